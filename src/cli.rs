use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docx-split")]
#[command(about = "Upload a Word document to the splitting server and download the split PDFs")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the splitting server
    #[arg(long, global = true, env = "DOCX_SPLIT_SERVER", default_value = "http://127.0.0.1:5001")]
    pub server: String,

    /// Output directory for the downloaded archive
    #[arg(short, long, global = true, default_value = "./output")]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a document and report its page count
    Inspect(InspectArgs),

    /// Upload a document, configure splits and download the archive
    Split(SplitArgs),

    /// Check pasted split data offline against a page count
    CheckPaste(CheckPasteArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// Word document (.doc or .docx)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Word document (.doc or .docx)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Replace the table with N default rows
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub generate: Option<i64>,

    /// Tab-separated rows (filename, start, end); "-" reads stdin
    #[arg(long, value_name = "PATH")]
    pub paste: Option<String>,

    /// Append a row, e.g. "chapter1.pdf:1-12"
    #[arg(long = "row", value_name = "NAME:START-END", value_parser = parse_row_spec)]
    pub rows: Vec<RowSpec>,

    /// Force overwrite of an existing archive
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CheckPasteArgs {
    /// Tab-separated rows (filename, start, end); "-" reads stdin
    #[arg(value_name = "PATH")]
    pub source: String,

    /// Page count of the target document
    #[arg(long, value_name = "N")]
    pub pages: u32,

    /// Write the parse report to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,
}

/// A manual row given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    pub filename: String,
    pub start: i64,
    pub end: i64,
}

pub fn parse_row_spec(raw: &str) -> Result<RowSpec, String> {
    let (filename, range) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:START-END, got '{}'", raw))?;
    let (start, end) = split_page_range(range)
        .ok_or_else(|| format!("expected START-END page range, got '{}'", range))?;

    let page = |value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid page number '{}': {}", value, e))
    };

    Ok(RowSpec {
        filename: filename.to_string(),
        start: page(start)?,
        end: page(end)?,
    })
}

// The separating '-' is the first one after a digit, so "-3-5" and "3--5" keep their signs.
fn split_page_range(range: &str) -> Option<(&str, &str)> {
    let bytes = range.as_bytes();
    (1..bytes.len())
        .find(|&idx| bytes[idx] == b'-' && bytes[idx - 1].is_ascii_digit())
        .map(|idx| (&range[..idx], &range[idx + 1..]))
}
