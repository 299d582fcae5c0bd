mod graphql;
mod metrics;

use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql_axum::GraphQLSubscription;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::graphql::CatalogSchema;
use crate::metrics::Metrics;
use crate::Result;

#[derive(Clone)]
pub struct State {
    pub schema: CatalogSchema,
    pub metrics: Arc<Metrics>,
}

pub async fn serve(addr: SocketAddr, state: State, cancel: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("gateway listening on {}", addr);

    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown(cancel))
        .await?;
    Ok(())
}

pub fn router(state: State) -> Router {
    Router::new()
        .route(
            "/graphql",
            get(graphql::graphiql).post(graphql::execute),
        )
        .route_service("/graphql/ws", GraphQLSubscription::new(state.schema.clone()))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics::encode))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn shutdown(cancel: CancellationToken) {
    select! {
        _ = cancel.cancelled() => {}
    }
}
