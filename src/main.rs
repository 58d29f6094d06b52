//! token-ring: a token-ring network simulator
//!
//! N nodes are wired into a cycle of single-slot links and pass one token
//! around it. The token carries a message, a recipient id and a hop budget:
//! - the recipient logs the message and keeps the token
//! - every other node spends one hop and forwards the token
//! - a token whose budget runs out is dropped
//!
//! Parameters come from CLI arguments, a TOML file, or an interactive prompt.

mod config;
mod driver;
mod error;
mod prompt;
mod report;
mod ring;

use config::Config;
use ring::Shutdown;
use std::io;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let params = if config.interactive {
        prompt::prompt_params(io::stdin().lock(), io::stdout())?
    } else {
        config.params()
    };

    info!(
        nodes = params.node_count,
        ttl = params.initial_ttl,
        recipient = params.recipient_id,
        exit_when_settled = config.exit_when_settled,
        "Starting token-ring"
    );

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(async {
        let (events, stream) = ring::event::channel();
        let shutdown = Shutdown::new();

        let reporter = tokio::spawn(report::report(
            stream,
            shutdown.clone(),
            config.exit_when_settled,
        ));

        {
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Interrupted, stopping ring");
                        shutdown.trigger();
                    }
                    Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
                }
            });
        }

        let result = driver::run(&params, events, shutdown.subscribe()).await;
        let summary = reporter.await?;

        info!(
            hops = summary.hops,
            delivered_at = ?summary.delivered_at,
            expired_at = ?summary.expired_at,
            settled = summary.is_settled(),
            "Run finished"
        );

        if let Err(e) = &result {
            error!(error = %e, "Ring failed");
        }
        result?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
