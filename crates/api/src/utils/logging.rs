use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "STAYBOOK_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_level`. Calling this twice is harmless; the
/// second installation attempt is ignored.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a request with structured fields.
///
/// Server errors log at error level, client errors at warn, the rest at info.
#[inline]
pub fn log_request_outcome(method: &Method, path: &str, status: StatusCode, elapsed: Duration) {
    let duration_ms = elapsed.as_millis() as u64;
    let status = status.as_u16();

    if status >= 500 {
        error!(%method, path, status, duration_ms, "request_failed");
    } else if status >= 400 {
        warn!(%method, path, status, duration_ms, "request_rejected");
    } else {
        info!(%method, path, status, duration_ms, "request_completed");
    }
}

/// Middleware wrapping every route with [`log_request_outcome`].
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    log_request_outcome(&method, &path, response.status(), started.elapsed());
    response
}
