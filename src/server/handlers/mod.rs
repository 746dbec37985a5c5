mod register;
mod status;
mod validate;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{Html, Response};

use crate::pages::index_page;

pub use register::register;
pub use status::{health_handler, metrics_handler, status_handler};
pub use validate::validate_ticket;

/// Registration landing page
pub async fn index_handler() -> Html<&'static str> {
    Html(index_page())
}

/// Logs method, path, status and latency of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        log::warn!("{method} {path} -> {} ({elapsed_ms:.1}ms)", status.as_u16());
    } else {
        log::info!("{method} {path} -> {} ({elapsed_ms:.1}ms)", status.as_u16());
    }
    response
}
