use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod app;
mod config;

use app::Outcome;
use config::{CliOverrides, FileConfig, INPUT_FILE, RunConfig};

/// Filter cloud logs by level and/or service.
///
/// Reads `logs.txt` from the working directory and writes matching entries to
/// the output file.
#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (INFO, WARN, ERROR), case-insensitive
    #[arg(long, value_name = "LEVEL")]
    level: Option<String>,

    /// Service name, matched exactly
    #[arg(long, value_name = "NAME")]
    service: Option<String>,

    /// Output file name [default: filtered_logs.txt]
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// TOML config file supplying defaults for --level, --service and --out
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            level: self.level.clone(),
            service: self.service.clone(),
            out: self.out.clone(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries the run summary
    let default_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args, Path::new("")) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the filter relative to `workdir` and return the summary for stdout
fn run(args: &Args, workdir: &Path) -> Result<Vec<String>> {
    let file_config = match args.config.as_deref() {
        Some(path) => FileConfig::load(&workdir.join(path))?,
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(args.overrides(), file_config, workdir);

    let outcome = app::execute(&config)?;
    if let Outcome::Completed(report) = &outcome {
        tracing::debug!(?report, "run finished");
    }

    Ok(app::summary(&outcome, &config, INPUT_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LOGS: &str = "2024-01-01T10:00:00 | info | auth-svc | login ok
2024-01-01T10:01:00 | WARN | auth-svc | slow token refresh
2024-01-01T10:02:00 | ERROR | billing | card declined
";

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("logsift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_run_with_flags() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logs.txt"), LOGS).unwrap();

        let lines = run(&parse(&["--level", "warn", "--out", "warn.txt"]), dir.path()).unwrap();

        assert_eq!(
            lines,
            vec!["Valid lines scanned: 3", "Lines written: 1", "Output file: warn.txt"]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("warn.txt")).unwrap(),
            "2024-01-01T10:01:00 | WARN | auth-svc | slow token refresh\n"
        );
    }

    #[test]
    fn test_run_with_config_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logs.txt"), LOGS).unwrap();
        fs::write(
            dir.path().join("settings.toml"),
            "level = \"ERROR\"\nout = \"errors.txt\"\n",
        )
        .unwrap();

        let lines = run(
            &parse(&["--config", "settings.toml", "--service", "billing"]),
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            lines,
            vec!["Valid lines scanned: 3", "Lines written: 1", "Output file: errors.txt"]
        );
    }

    #[test]
    fn test_run_ignores_config_file_without_flag() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logs.txt"), LOGS).unwrap();
        fs::write(dir.path().join("logsift.toml"), "garbage").unwrap();

        let lines = run(&parse(&[]), dir.path()).unwrap();

        assert_eq!(
            lines,
            vec![
                "Valid lines scanned: 3",
                "Lines written: 3",
                "Output file: filtered_logs.txt",
            ]
        );
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempdir().unwrap();

        let lines = run(&parse(&[]), dir.path()).unwrap();

        assert_eq!(
            lines,
            vec!["ERROR: Cannot find logs.txt. Put logs.txt in the working directory."]
        );
    }

    #[test]
    fn test_run_missing_config_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logs.txt"), LOGS).unwrap();

        assert!(run(&parse(&["--config", "nope.toml"]), dir.path()).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "logsift", "--level", "error", "--service", "auth-svc", "--out", "out.txt", "-vv",
        ])
        .unwrap();

        assert_eq!(args.level.as_deref(), Some("error"));
        assert_eq!(args.service.as_deref(), Some("auth-svc"));
        assert_eq!(args.out, Some(PathBuf::from("out.txt")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_all_optional() {
        let args = Args::try_parse_from(["logsift"]).unwrap();
        let overrides = args.overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.service.is_none());
        assert!(overrides.out.is_none());
    }

    #[test]
    fn test_args_reject_positional_input() {
        assert!(Args::try_parse_from(["logsift", "other.txt"]).is_err());
    }

    #[test]
    fn test_args_command_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
