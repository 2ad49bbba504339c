//! registry-sync CLI

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use registry_sync::ops::{self, SyncEvent};
use registry_sync::util::diagnostic::{self, Diagnostic};
use registry_sync::util::shell::{format_duration, Shell, Status};
use registry_sync::{SyncConfig, SyncError};

mod cli;

use cli::{Cli, MessageFormat};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("registry_sync=debug")
    } else if cli.quiet {
        EnvFilter::new("registry_sync=error")
    } else {
        EnvFilter::new("registry_sync=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    );

    let start = Instant::now();
    match run(&cli, &shell) {
        Ok(report) => {
            let elapsed = start.elapsed();
            if shell.is_json() {
                shell.json_event(&SyncEvent::Finished {
                    updated: report.updated(),
                    skipped: report.skipped(),
                    duration_ms: elapsed.as_millis() as u64,
                });
            } else {
                shell.status(
                    Status::Finished,
                    format!(
                        "updated {} file(s), skipped {} in {}",
                        report.updated(),
                        report.skipped(),
                        format_duration(elapsed)
                    ),
                );
            }
        }
        Err(e) => {
            report_failure(&shell, &e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, shell: &Shell) -> Result<ops::SyncReport> {
    let config = SyncConfig::discover(&cli.root, cli.config.as_deref())?;
    let report = ops::sync(&cli.root, &config, shell)?;
    Ok(report)
}

fn report_failure(shell: &Shell, error: &anyhow::Error) {
    let sync_error = error.downcast_ref::<SyncError>();

    if shell.is_json() {
        shell.json_event(&SyncEvent::Error {
            message: format!("{:#}", error),
            path: sync_error.and_then(|e| e.path().cloned()),
        });
        return;
    }

    let diag = match sync_error {
        Some(e) => e.to_diagnostic(),
        None => {
            let mut diag = Diagnostic::error(error.to_string());
            for cause in error.chain().skip(1) {
                diag = diag.with_context(cause.to_string());
            }
            diag
        }
    };
    diagnostic::emit(&diag, shell.use_color());
    shell.status(Status::Error, "registry sync failed");
}
