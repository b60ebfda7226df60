//! Static responder command
//!
//! Answers every request with `Node App is Running!`.

use anyhow::{Context, Result};
use clap::Parser;

use liveline_server::run_static;

use super::ListenArgs;

/// Arguments for the static command
#[derive(Parser, Debug)]
pub struct StaticArgs {
    #[command(flatten)]
    pub listen: ListenArgs,
}

/// Run the static responder (blocks until the process is killed)
pub async fn run_static_server(args: StaticArgs) -> Result<()> {
    run_static(args.listen.into())
        .await
        .context("Static responder error")?;

    Ok(())
}
