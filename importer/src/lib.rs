//! # Lexiload - vocabulary word profile importer
//!
//! Lexiload reads flat CSV rows describing vocabulary words, reshapes each
//! row into a nested word profile, and upserts it into PostgreSQL keyed by
//! the word.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│   Import    │──▶ word_profiles
//! │   (UTF-8)   │     │ (flat rows) │     │  (profile)  │     │  (upsert)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lexiload::{parse_csv_file, DatabaseConfig, Importer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let parsed = parse_csv_file("words.csv", None)?;
//!     let importer = Importer::connect(&DatabaseConfig::from_env()?).await?;
//!     let summary = importer.run(parsed.records).await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Flat record and word profile types
//! - [`parser`] - CSV reading
//! - [`transform`] - Row to profile transformation
//! - [`store`] - Record stores (PostgreSQL, in-memory)
//! - [`import`] - Import driver
//! - [`config`] - Database configuration
//! - [`sample`] - Template CSV

// Core modules
pub mod error;
pub mod models;

// Input
pub mod parser;
pub mod sample;

// Transformation
pub mod transform;

// Persistence
pub mod config;
pub mod import;
pub mod store;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, CsvError, ImportError, RowError, StoreError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AdjectiveForms, Affix, Analysis, Definitions, Etymology, FlatRecord, MorphemeBreakdown,
    NounForms, Root, VerbTenses, WordForms, WordProfile,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{decode_content, detect_delimiter, parse_bytes, parse_csv, parse_csv_file, ParseResult};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{parse_structured_field, profile_from_record, split_list};

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use config::DatabaseConfig;
pub use import::{check_headers, report_headers, HeaderReport, ImportSummary, Importer, RowFailure};
pub use store::{MemoryDatabase, MemoryStore, PgRecordStore, RecordStore, StoredProfile};

// =============================================================================
// Re-exports - Template
// =============================================================================

pub use sample::{sample_record, write_template, DEFAULT_TEMPLATE_PATH};
