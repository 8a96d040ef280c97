//! Reads a section's rendered HTML from stdin and prints the release page
//! names it links to, one per line.
//!
//! Usage: `section_pages [--fallback] [--json] [--options FILE]`
//!
//! `--fallback` skips table extraction and runs the flat link scan only.
//! Set `RUST_LOG=discog_pages=debug` for per-table diagnostics.

use std::io::{self, Read};
use std::process::ExitCode;

use discog_pages::{collect_from_html, flat_scan, Options};
use tracing_subscriber::EnvFilter;

struct Args {
    fallback: bool,
    json: bool,
    options_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        fallback: false,
        json: false,
        options_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fallback" => args.fallback = true,
            "--json" => args.json = true,
            "--options" => {
                args.options_path = Some(iter.next().ok_or("--options needs a file path")?);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn load_options(path: Option<&str>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    Options::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let options = load_options(args.options_path.as_deref())?;

    let mut html = String::new();
    io::stdin()
        .read_to_string(&mut html)
        .map_err(|e| format!("failed to read from stdin: {e}"))?;

    let names = if args.fallback {
        flat_scan(&html, &options)
    } else {
        collect_from_html(&html, &options)
    }
    .map_err(|e| e.to_string())?;

    if args.json {
        let list: Vec<&String> = names.iter().collect();
        let out = serde_json::to_string(&list).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        for name in &names {
            println!("{name}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("section_pages: {err}");
            ExitCode::FAILURE
        }
    }
}
