use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State as AxumState;
use axum::response::{Html, IntoResponse};

use super::State;

pub(crate) async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/graphql/ws")
            .finish(),
    )
}

pub(crate) async fn execute(
    AxumState(state): AxumState<State>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let req = req.into_inner();
    let operation = req.operation_name.as_deref().unwrap_or("anonymous");
    state.metrics.graphql.count_request(operation);
    state.schema.execute(req).await.into()
}
