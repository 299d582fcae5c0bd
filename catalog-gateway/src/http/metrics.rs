use axum::extract::State as AxumState;

use super::State;

pub(crate) async fn encode(AxumState(state): AxumState<State>) -> String {
    let mut buffer = String::new();
    let registry = &*state.metrics.registry;
    match prometheus_client::encoding::text::encode(&mut buffer, registry) {
        Ok(_) => buffer,
        Err(_) => "".into(),
    }
}
