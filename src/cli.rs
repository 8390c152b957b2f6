//! Command-line arguments.

use clap::Parser;
use ddlview::Position;
use std::path::PathBuf;

/// Diagnose a CREATE VIEW statement and resolve cursor contexts
#[derive(Parser, Debug)]
#[command(name = "ddlview")]
#[command(about = "Analyze a CREATE VIEW statement", long_about = None)]
#[command(version)]
pub struct Args {
    /// DDL file to analyze (reads from stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the completion context at this 0-based position
    #[arg(long, value_name = "LINE:CHAR")]
    pub at: Option<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file_and_position() {
        let args = Args::parse_from(["ddlview", "view.sql", "--at", "2:14"]);
        assert_eq!(args.file, Some(PathBuf::from("view.sql")));
        assert_eq!(args.at, Some(Position::new(2, 14)));
    }

    #[test]
    fn stdin_when_no_file() {
        let args = Args::parse_from(["ddlview"]);
        assert!(args.file.is_none());
        assert!(args.at.is_none());
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(Args::try_parse_from(["ddlview", "--at"]).is_err());
        assert!(Args::try_parse_from(["ddlview", "--at", "x"]).is_err());
        assert!(Args::try_parse_from(["ddlview", "a.sql", "b.sql"]).is_err());
        assert!(Args::try_parse_from(["ddlview", "--verbose"]).is_err());
    }
}
