//! Transformation module.
//!
//! - Row: flat CSV row to nested word profile
//! - Structured: tolerant parsing of embedded JSON cells

pub mod row;
pub mod structured;

pub use row::{profile_from_record, split_list, LIST_SEPARATOR};
pub use structured::parse_structured_field;
