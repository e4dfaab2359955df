//! Demo endpoints served by the binary.

use axum::response::Response;
use serde_json::json;

use crate::context::RequestContext;
use crate::http::response::{ok_json, ok_text};
use crate::http::server::Engine;
use crate::routing::RouterError;

/// Echo every request header as `name=value` lines.
pub async fn headers(ctx: RequestContext) -> Response {
    let body: String = ctx
        .headers
        .iter()
        .map(|(name, value)| format!("{}={}\n", name, value.to_str().unwrap_or("<binary>")))
        .collect();
    ok_text(body)
}

/// Report the client address.
///
/// Prefers the `remote-addr` header set by a fronting proxy over the
/// socket peer.
pub async fn ip(ctx: RequestContext) -> Response {
    let ip = ctx
        .header("remote-addr")
        .map(str::to_string)
        .or_else(|| ctx.remote_addr.map(|addr| addr.ip().to_string()))
        .unwrap_or_default();
    ok_text(format!("IP={ip}\n"))
}

pub async fn user_agent(ctx: RequestContext) -> Response {
    ok_text(format!(
        "User-Agent={}\n",
        ctx.header("user-agent").unwrap_or_default()
    ))
}

pub async fn blog(ctx: RequestContext) -> Response {
    ok_json(&json!({ "blogId": ctx.param("blogId") }))
}

/// Wire the demo endpoints into `engine`.
pub fn register(engine: &mut Engine) -> Result<(), RouterError> {
    engine
        .get("/headers", headers)?
        .get("/ip", ip)?
        .get("/user-agent", user_agent)?
        .get("/blog/:blogId", blog)?;
    Ok(())
}
