//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file to use instead of the one in the OS config directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for the database and log file
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "fairway=trace". RUST_LOG takes precedence.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = Args::try_parse_from(["fairway"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.data_dir.is_none());
        assert!(args.log_filter.is_none());
    }

    #[test]
    fn test_all_args() {
        let args = Args::try_parse_from([
            "fairway",
            "--config",
            "/etc/fairway.toml",
            "-d",
            "/tmp/golf",
            "--log-filter",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/fairway.toml")));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/golf")));
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
    }
}
