//! Handlers for the public redirect endpoints.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::application::services::redirect_service::{RedirectCommand, ResolvedRedirect};
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves `GET /r/{campaign_id}/{url_id}`.
///
/// # Request Flow
///
/// 1. Resolve the URL and register the click (atomic, never overruns)
/// 2. Queue a click audit event (fire-and-forget)
/// 3. Respond per the campaign's redirect method
///
/// # Errors
///
/// Returns 404 Not Found for an unknown campaign/URL pair and
/// 410 Gone for an exhausted URL. Errors are terminal; a dead link
/// stays dead.
pub async fn direct_redirect_handler(
    Path((campaign_id, url_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let resolved = state
        .redirect_service
        .resolve_direct(campaign_id, url_id)
        .await?;

    queue_click(&state, &resolved, &headers, addr);
    Ok(deliver(resolved.command))
}

/// Resolves `GET /r/bridge/{campaign_id}/{url_id}`, the second hop of a
/// double meta refresh. Registers its own click and refreshes straight
/// to the target.
pub async fn bridge_redirect_handler(
    Path((campaign_id, url_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let resolved = state
        .redirect_service
        .resolve_bridge(campaign_id, url_id)
        .await?;

    queue_click(&state, &resolved, &headers, addr);
    Ok(deliver(resolved.command))
}

/// Resolves `GET /views/{custom_path}`: the slug names a campaign, then
/// weighted rotation picks among its active URLs.
pub async fn custom_path_handler(
    Path(custom_path): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let resolved = state
        .redirect_service
        .resolve_custom_path(&custom_path)
        .await?;

    queue_click(&state, &resolved, &headers, addr);
    Ok(deliver(resolved.command))
}

/// Resolves `GET /c/{campaign_id}` by weighted rotation.
///
/// # Errors
///
/// Returns 410 Gone when the campaign has no active URL with remaining
/// clicks ("campaign exhausted").
pub async fn rotation_redirect_handler(
    Path(campaign_id): Path<i64>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let resolved = state.redirect_service.resolve_rotation(campaign_id).await?;

    queue_click(&state, &resolved, &headers, addr);
    Ok(deliver(resolved.command))
}

/// Queues a click audit event. Non-blocking: a full queue drops the
/// audit row, never the response.
fn queue_click(
    state: &AppState,
    resolved: &ResolvedRedirect,
    headers: &HeaderMap,
    addr: SocketAddr,
) {
    let event = ClickEvent::new(
        resolved.url_id,
        resolved.campaign_id,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let _ = state.click_sender.try_send(event);
}

/// Maps a resolved redirect command onto an HTTP response.
fn deliver(command: RedirectCommand) -> Response {
    match command {
        RedirectCommand::Found { location } => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        RedirectCommand::TemporaryRedirect { location } => {
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
        RedirectCommand::MetaRefresh { location } => Html(refresh_page(&location)).into_response(),
    }
}

/// Minimal page carrying a zero-delay refresh directive.
fn refresh_page(location: &str) -> String {
    // Targets are normalized http(s) URLs; quotes still get escaped so
    // the attribute cannot be broken out of.
    let safe = location.replace('"', "%22");
    format!(
        "<!DOCTYPE html>\n<html><head><meta http-equiv=\"refresh\" content=\"0;url={safe}\"></head><body></body></html>"
    )
}
