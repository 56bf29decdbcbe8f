//! VCBridge Daemon (vcbridged)
//!
//! The worker process an editor spawns to talk to a version-control
//! backend. The wire protocol runs over stdin/stdout, so all diagnostics
//! go to stderr or a log file.
//!
//! # Usage
//!
//! ```bash
//! # Serve the in-memory stub backend on stdio
//! vcbridged
//!
//! # Pick a backend explicitly
//! vcbridged --backend stub
//!
//! # Log to a file instead of stderr
//! vcbridged --log-file /tmp/vcbridged.log --log-level debug
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Layer};

use vcbridge_backend::StubBackend;
use vcbridge_engine::{Engine, Session};

/// VCBridge Daemon - editor-to-version-control protocol worker
#[derive(Parser, Debug)]
#[command(name = "vcbridged")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend to serve
    #[arg(long, env = "VCBRIDGE_BACKEND", default_value = "stub")]
    backend: String,

    /// Initial log filter (overridden at runtime by the host's
    /// vcSharedLogLevel config key)
    #[arg(long, env = "VCBRIDGE_LOG", default_value = "info")]
    log_level: String,

    /// Log file path; stderr when omitted
    #[arg(long, env = "VCBRIDGE_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Non-command input lines tolerated before the stream is declared
    /// corrupt
    #[arg(long, default_value = "1000")]
    bogus_line_limit: usize,
}

/// Host log-level tokens mapped onto tracing filter directives.
fn filter_directive(level: &str) -> &str {
    match level {
        "verbose" | "debug" => "debug",
        "trace" => "trace",
        "info" | "notice" => "info",
        "warning" | "warn" => "warn",
        "error" | "fatal" => "error",
        other => other,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)?;
    let (filter, reload_handle) = reload::Layer::new(filter);
    let fmt_layer = match &args.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .boxed()
        }
        None => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    let session = Session::new().with_log_level_hook(move |level| {
        match EnvFilter::try_new(filter_directive(level)) {
            Ok(filter) => {
                if let Err(err) = reload_handle.reload(filter) {
                    warn!(%err, "failed to reload log filter");
                }
            }
            Err(_) => warn!(level, "unrecognized log level from host"),
        }
    });

    let backend = match args.backend.as_str() {
        "stub" => StubBackend::new(),
        other => bail!("unknown backend: {other}"),
    };

    info!(backend = %args.backend, "vcbridged starting on stdio");
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut engine = Engine::new(stdin, stdout, backend)
        .with_session(session)
        .with_bogus_line_limit(args.bogus_line_limit);
    engine.run()?;
    info!("vcbridged shut down cleanly");
    Ok(())
}
