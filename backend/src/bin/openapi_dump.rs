//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use backend::doc::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// Dump the backend OpenAPI document to standard output.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the backend OpenAPI document")]
struct Args {
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
