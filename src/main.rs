//! badref CLI - Find invalid ownerReferences
//!
//! Exit status: 0 when no errors were found, 1 when at least one ownership
//! error was found, 2 when the audit could not run at all.

use anyhow::Context;
use badref::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status for setup failures, distinct from "errors found".
const EXIT_SETUP_FAILURE: u8 = 2;

/// Find invalid ownerReferences in a cluster resource store.
#[derive(Parser, Debug)]
#[command(name = "badref", version, about)]
struct Cli {
    /// Snapshot directory to audit
    #[arg(long, short = 's', env = "BADREF_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, short = 'c', env = "BADREF_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: 'text' or 'json'
    #[arg(long, short = 'o')]
    format: Option<OutputFormat>,

    /// Abort enumeration after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Merge the optional config file with command-line overrides.
    fn audit_config(&self) -> anyhow::Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::load(path).map_err(BadrefError::from)?,
            None => AuditConfig::default(),
        };
        if let Some(dir) = &self.snapshot {
            config = config.with_snapshot_dir(dir);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.audit_config()?;
    log::debug!("Configuration: {:?}", config);

    let report = Audit::default()
        .run_snapshot(&config)
        .with_context(|| format!("auditing {}", config.snapshot_dir.display()))?;

    let stdout = std::io::stdout();
    Reporter::new(config.format)
        .write(&report, &mut stdout.lock())
        .context("writing report")?;

    Ok(report.exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(fix) = e
                .downcast_ref::<BadrefError>()
                .and_then(BadrefError::suggested_fix)
            {
                eprintln!("   → Suggestion: {}", fix);
            }
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}
