use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand, Debug)]
pub enum Commands {
    /// Serve the GraphQL gateway
    Serve(ServeArgs),
    /// Print the Service Catalog CRDs as YAML
    CrdGen,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// GraphQL, health and metrics listener
    #[arg(long, env = "LISTEN_ADDRESS", default_value = "0.0.0.0:3000")]
    pub listen_address: SocketAddr,

    /// Bound on the initial cache sync at startup
    #[arg(long, env = "CACHE_SYNC_TIMEOUT_SECONDS", default_value_t = 30)]
    pub cache_sync_timeout_seconds: u64,
}

impl ServeArgs {
    pub fn cache_sync_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_sync_timeout_seconds)
    }
}
