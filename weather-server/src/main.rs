//! Binary crate for the weather gateway HTTP server.
//!
//! This crate focuses on:
//! - Parsing server flags
//! - Wiring middleware (CORS, request tracing)
//! - Serving the gateway routes

use clap::Parser;

mod error;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = server::Args::parse();
    server::run(args).await
}
