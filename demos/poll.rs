//! # Example: poll
//!
//! Polls a URL through the string boundary and prints every `pollResult`
//! payload as JSON until Ctrl-C (or the optional run time) elapses.
//!
//! ## Flow
//! ```text
//! PollerService::start_polling(url, secs)
//!     └─► Controller::start ──► Scheduler ──► probe_once ──► Bus
//!                                                            ├─► LogWriter (tracing)
//!                                                            └─► ChannelSubscriber ──► stdout
//! Ctrl-C / deadline ──► PollerService::stop_polling ──► Controller::shutdown
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=url_poller=debug cargo run --example poll --features logging -- https://example.com/ 2 10
//! ```

use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;
use url_poller::{ChannelSubscriber, Controller, LogWriter, PollerConfig, PollerService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let target = args.next().unwrap_or_else(|| "https://example.com/".to_string());
    let interval: i64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(2);
    let run_for: Option<u64> = args.next().map(|s| s.parse()).transpose()?;

    let (sub, mut results) = ChannelSubscriber::poll_results();
    let controller = Controller::builder(PollerConfig::default())
        .with_subscriber(Arc::new(LogWriter))
        .with_subscriber(sub)
        .build()?;
    let service = PollerService::new(Arc::new(controller));

    println!("{}", service.start_polling(&target, interval).await);

    let printer = tokio::spawn(async move {
        while let Some(ev) = results.recv().await {
            if let Some((channel, payload)) = PollerService::wire_message(&ev) {
                println!("[{channel}] {payload}");
            }
        }
    });

    match run_for {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => tokio::signal::ctrl_c().await?,
    }

    println!("{}", service.stop_polling().await);

    let controller = service.controller().clone();
    drop(service);
    match Arc::try_unwrap(controller) {
        Ok(controller) => controller.shutdown().await,
        Err(_) => anyhow::bail!("controller still shared"),
    }
    printer.await?;
    Ok(())
}
