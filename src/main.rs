mod cli;

use clap::Parser;
use cli::Args;
use ddlview::{Result, Statement};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn read_input(file: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    match file {
        Some(path) => text = std::fs::read_to_string(path)?,
        None => {
            std::io::stdin().read_to_string(&mut text)?;
        }
    }
    Ok(text)
}

fn run(args: Args) -> Result {
    let text = read_input(args.file.as_deref())?;
    debug!("Read {} bytes of DDL", text.len());

    let statement = Statement::parse(&text);
    for diagnostic in statement.diagnostics() {
        let start = diagnostic.range(statement.tokens()).start;
        println!(
            "{start} {} {} {}",
            diagnostic.severity(),
            diagnostic.code,
            diagnostic.message
        );
    }
    if let Some(position) = args.at {
        println!("{position} {}", statement.context_at(position));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // usage errors exit with status 2
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
