//! Lexiload CLI - Import vocabulary word profiles from CSV
//!
//! ```bash
//! lexiload import words.csv             # Upsert every row into word_profiles
//! lexiload import words.csv --dry-run   # Run the whole import without a database
//! lexiload transform words.csv          # Print the profiles as JSON
//! lexiload template                     # Write sample_word_profiles.csv
//! ```
//!
//! `DATABASE_URL` (and optionally `LEXILOAD_TABLE`) are read from the
//! environment or a `.env` file.

use clap::{Parser, Subcommand};
use lexiload::error::ImportResult;
use lexiload::{
    parse_csv_file, profile_from_record, report_headers, write_template, DatabaseConfig,
    ImportSummary, Importer, MemoryDatabase, WordProfile, DEFAULT_TEMPLATE_PATH,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexiload")]
#[command(about = "Import vocabulary word profiles from CSV into PostgreSQL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV file into the word_profiles table
    Import {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Target table (default: LEXILOAD_TABLE or public.word_profiles)
        #[arg(short, long)]
        table: Option<String>,

        /// Database URL (default: DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,

        /// Transform and count without touching the database
        #[arg(long)]
        dry_run: bool,
    },

    /// Transform a CSV file and output the profiles as JSON
    Transform {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a template CSV with one fully worked example
    Template {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_TEMPLATE_PATH)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input,
            delimiter,
            table,
            database_url,
            dry_run,
        } => cmd_import(&input, delimiter, table, database_url, dry_run).await,

        Commands::Transform {
            input,
            delimiter,
            output,
        } => cmd_transform(&input, delimiter, output.as_deref()),

        Commands::Template { output } => cmd_template(&output),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_import(
    input: &Path,
    delimiter: Option<char>,
    table: Option<String>,
    database_url: Option<String>,
    dry_run: bool,
) -> ImportResult<()> {
    eprintln!("📄 Importing: {}", input.display());

    let parsed = parse_csv_file(input, delimiter)?;
    eprintln!("   Delimiter: '{}'", format_delimiter(parsed.delimiter));
    eprintln!("   Rows: {}", parsed.records.len());
    report_headers(&parsed.headers);

    let summary = if dry_run {
        eprintln!("   Dry run: nothing will be written");
        let db = MemoryDatabase::new();
        Importer::new(db.begin()).run(parsed.records).await?
    } else {
        let mut config = DatabaseConfig::from_env_with_url(database_url)?;
        if let Some(table) = table {
            config = config.with_table(table)?;
        }
        Importer::connect(&config).await?.run(parsed.records).await?
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    eprintln!("\n📊 {}", summary);
    for failure in summary.failures.iter().take(5) {
        if failure.word.is_empty() {
            eprintln!("   - Row {}: {}", failure.row, failure.reason);
        } else {
            eprintln!("   - Row {} ('{}'): {}", failure.row, failure.word, failure.reason);
        }
    }
    if summary.failures.len() > 5 {
        eprintln!("   ... +{} more", summary.failures.len() - 5);
    }
}

fn cmd_transform(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> ImportResult<()> {
    eprintln!("📄 Transforming: {}", input.display());

    let parsed = parse_csv_file(input, delimiter)?;
    report_headers(&parsed.headers);

    let mut profiles: Vec<WordProfile> = Vec::with_capacity(parsed.records.len());
    for (idx, record) in parsed.records.iter().enumerate() {
        let profile = profile_from_record(record);
        if profile.has_word() {
            profiles.push(profile);
        } else {
            eprintln!("   ⚠️  Row {}: missing word, skipped", idx + 1);
        }
    }
    eprintln!("✅ Transformed {} of {} rows", profiles.len(), parsed.records.len());

    let json = serde_json::to_string_pretty(&profiles)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_template(output: &Path) -> ImportResult<()> {
    write_template(output)?;
    eprintln!("✅ Created {}", output.display());
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> ImportResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
