use async_graphql::{Error as GraphQLError, ErrorExtensions};
use tracing::error;

const CODE_NOT_FOUND: &str = "NOT_FOUND";
const CODE_ALREADY_EXISTS: &str = "ALREADY_EXISTS";
const CODE_INTERNAL: &str = "INTERNAL";

pub(crate) fn not_found(kind: &str, name: &str, environment: Option<&str>) -> GraphQLError {
    with_code(message(kind, name, environment, "not found"), CODE_NOT_FOUND)
}

pub(crate) fn already_exists(kind: &str, name: &str, environment: Option<&str>) -> GraphQLError {
    with_code(
        message(kind, name, environment, "already exists"),
        CODE_ALREADY_EXISTS,
    )
}

pub(crate) fn internal(kind: &str, name: &str, environment: Option<&str>) -> GraphQLError {
    with_code(
        message(kind, name, environment, "cannot be handled"),
        CODE_INTERNAL,
    )
}

/// Translate an internal failure into one of the three client-facing kinds.
/// Anything that is not a Kubernetes not-found or conflict collapses to
/// internal, with the original error kept in the server log only.
pub(crate) fn resource_error(
    kind: &str,
    name: &str,
    environment: Option<&str>,
    err: crate::Error,
) -> GraphQLError {
    match &err {
        crate::Error::NotFound { .. } => return not_found(kind, name, environment),
        crate::Error::KubeError(kube::Error::Api(response)) => match response.code {
            404 => return not_found(kind, name, environment),
            409 => return already_exists(kind, name, environment),
            _ => {}
        },
        _ => {}
    }
    error!(error = %err, "failed to handle {kind} {name}");
    internal(kind, name, environment)
}

fn message(kind: &str, name: &str, environment: Option<&str>, what: &str) -> String {
    match environment {
        Some(environment) => {
            format!("{kind} \"{name}\" in environment \"{environment}\" {what}")
        }
        None => format!("{kind} \"{name}\" {what}"),
    }
}

fn with_code(message: String, code: &str) -> GraphQLError {
    GraphQLError::new(message).extend_with(|_, extensions| extensions.set("code", code))
}
