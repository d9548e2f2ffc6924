//! Per-request access logging.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, Version, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::{net::SocketAddr, time::Instant};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::access_event::AccessEvent;
use crate::state::AppState;

/// Logs every request in combined log format and queues successful ones for
/// the analytics file.
///
/// The client address is the first `X-Forwarded-For` entry when present,
/// otherwise the socket peer. Queueing never blocks: when the access queue is
/// full the event is dropped and counted in `access_events_dropped_total`.
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().to_string();
    let url = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let http_version = http_version(req.version());
    let ip = client_ip(req.headers(), req.extensions().get::<ConnectInfo<SocketAddr>>());
    let user_agent = header_value(req.headers(), header::USER_AGENT.as_str());
    let referrer = header_value(req.headers(), header::REFERER.as_str())
        .or_else(|| header_value(req.headers(), "referrer"));

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed();

    tracing::info!(
        r#"{ip} - - "{method} {url} HTTP/{version}" {status} - "{referer}" "{ua}" {ms}ms"#,
        ip = ip.as_deref().unwrap_or("-"),
        method = method,
        url = url,
        version = http_version,
        status = status,
        referer = referrer.as_deref().unwrap_or("-"),
        ua = user_agent.as_deref().unwrap_or("-"),
        ms = elapsed.as_millis(),
    );

    let event = AccessEvent {
        date: Utc::now(),
        http_version: http_version.to_string(),
        method,
        referrer,
        ip,
        response_time_ms: elapsed.as_secs_f64() * 1000.0,
        status,
        url,
        user_agent: user_agent.unwrap_or_default(),
    };

    if event.is_recorded() {
        match state.access_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("access_events_dropped_total").increment(1);
                debug!("Access queue full, dropped event for {}", event.url);
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Access queue is closed");
            }
        }
    }

    response
}

fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
}
