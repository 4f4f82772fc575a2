//! CI entry point: validate a content tree and exit non-zero on any error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use pathwise::content::ContentValidator;
use pathwise::{config, logging};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Check the learning-path content tree for schema violations.
#[derive(Parser, Debug)]
#[command(name = "validate_content", version, about)]
struct Cli {
    /// Content root (defaults to the configured content directory)
    #[arg(long)]
    content_root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> ExitCode {
    logging::init_stderr("pathwise=info");

    let cli = Cli::parse();
    let root = cli
        .content_root
        .unwrap_or_else(|| config::load().content_dir);

    let report = ContentValidator::from_dir(&root).validate();

    match cli.format {
        Format::Text => print!("{}", report.render_text()),
        Format::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
