#[macro_use]
extern crate tracing;

use clap::Parser;
use eyre::Result;
use nodeport_report::{
    cluster,
    config::Args,
    error::Error,
    report,
    shutdown::ShutdownSignals,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().expect("color_eyre init");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // fails on a bad --grep before anything talks to the cluster
    let filter = args.name_filter()?;
    let mut signals = ShutdownSignals::new()?;

    let run = async {
        let client = cluster::connect(&args).await?;
        let mut stdout = std::io::stdout();
        report::run(&client, &args.namespace, &filter, &mut stdout).await
    };

    let summary = tokio::select! {
        result = run => result?,
        signal = signals.recv() => {
            warn!("received {signal}, cancelling");
            return Err(Error::Interrupted(signal).into());
        }
    };

    debug!(?summary, "done");

    Ok(())
}
