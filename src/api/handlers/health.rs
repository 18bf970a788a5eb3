//! Liveness endpoint.

/// Responds with `ok` while the server is accepting requests.
pub async fn health() -> &'static str {
    "ok"
}
