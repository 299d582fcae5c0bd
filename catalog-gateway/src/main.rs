use std::sync::Arc;

use catalog_gateway::config::{Cli, Commands};
use catalog_gateway::metrics::Metrics;
use catalog_gateway::{catalog, graphql, http, kubernetes, Result};
use clap::Parser;
use tokio::task::JoinError;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => {
            setup_subscriber();

            let cancel = tokio_util::sync::CancellationToken::new();
            let client = kube::Client::try_default().await?;
            let caches = kubernetes::CatalogCaches::start(
                client.clone(),
                args.cache_sync_timeout(),
                cancel.child_token(),
            )
            .await?;
            let services = Arc::new(catalog::Services::new(client, caches));
            let metrics = Arc::new(Metrics::default());
            let schema = graphql::build_schema(services, metrics.clone());
            let state = http::State { schema, metrics };

            let mut server_handle =
                tokio::spawn(http::serve(args.listen_address, state, cancel.child_token()));
            let mut shutdown_handle = tokio::spawn(async move { shutdown_signal().await });
            // watch for shutdown and errors
            tokio::select! {
                h = &mut server_handle => exit("server", h),
                _ = &mut shutdown_handle => {
                    cancel.cancel();
                    exit("server", server_handle.await);
                },
            };
            info!("Exiting...");
        }
        Commands::CrdGen => catalog_gateway_crds::crd_gen_all()?,
    }
    Ok(())
}

fn setup_subscriber() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };
    tokio::select! {
        _ = ctrl_c => {
          info!("captured ctrl_c signal");
        },
        _ = terminate => {},
    }
}

fn exit(task: &str, out: Result<Result<()>, JoinError>) {
    match out {
        Ok(Ok(_)) => {
            info!("{task} exited")
        }
        Ok(Err(e)) => {
            error!("{task} failed with error: {e}")
        }
        Err(e) => {
            error!("{task} task failed to complete: {e}")
        }
    }
}
