//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Collect route registrations into the trie router
//! - Freeze the router and mount it as the Axum fallback
//! - Wire up middleware (request ID, tracing, timeout)
//! - Build a fresh `RequestContext` per request and invoke the handler
//! - Observability (metrics, request IDs in log lines)

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::Response,
};
use futures_util::future::{BoxFuture, FutureExt};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::EngineConfig;
use crate::context::RequestContext;
use crate::http::request::{self, propagate_request_id_layer, set_request_id_layer};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::{Method, Router, RouterError};

/// A registered request handler.
pub type Handler = Arc<dyn Fn(RequestContext) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wrap an async function as a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |ctx| f(ctx).boxed())
}

/// State shared by every dispatch.
#[derive(Clone)]
struct AppState {
    router: Arc<Router<Handler>>,
    max_body_size: usize,
}

/// Route registration plus the HTTP server that serves the frozen routes.
pub struct Engine {
    router: Router<Handler>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            router: Router::new(),
            config,
        }
    }

    /// Register a handler. See [`Router::add_route`].
    pub fn add_route<F, Fut>(
        &mut self,
        method: &str,
        pattern: &str,
        f: F,
    ) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.add_route(method, pattern, handler(f))?;
        Ok(self)
    }

    fn route<F, Fut>(&mut self, method: Method, pattern: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.route(method, pattern, handler(f))?;
        Ok(self)
    }

    pub fn get<F, Fut>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Get, pattern, f)
    }

    pub fn post<F, Fut>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Post, pattern, f)
    }

    pub fn put<F, Fut>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Put, pattern, f)
    }

    pub fn delete<F, Fut>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Delete, pattern, f)
    }

    pub fn patch<F, Fut>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Patch, pattern, f)
    }

    pub fn router(&self) -> &Router<Handler> {
        &self.router
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Freeze the routes and build the Axum application.
    #[allow(deprecated)]
    pub fn into_app(self) -> axum::Router {
        let routes = self.router.routes();
        for (method, pattern) in &routes {
            tracing::info!(method = %method, pattern = %pattern, "Route mounted");
        }
        metrics::record_routes(routes.len());

        let state = AppState {
            router: Arc::new(self.router),
            max_body_size: self.config.limits.max_body_size,
        };

        // Outermost first: the ID must exist before the trace span opens.
        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeouts.request_secs,
            )));

        axum::Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware)
    }

    /// Serve until `shutdown` fires, then drain for at most
    /// `timeouts.shutdown_secs`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let drain_deadline = Duration::from_secs(self.config.timeouts.shutdown_secs);
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .into_app()
            .into_make_service_with_connect_info::<SocketAddr>();

        let (draining_tx, mut draining_rx) = oneshot::channel::<()>();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
                let _ = draining_tx.send(());
            })
            .into_future();
        tokio::pin!(serve);

        tokio::select! {
            biased;
            result = &mut serve => {
                result?;
                tracing::info!("HTTP server stopped");
                return Ok(());
            }
            Ok(()) = &mut draining_rx => {}
        }

        match tokio::time::timeout(drain_deadline, serve).await {
            Ok(result) => result?,
            Err(_) => tracing::warn!(
                deadline_secs = drain_deadline.as_secs(),
                "Drain deadline exceeded, dropping in-flight requests"
            ),
        }
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: every request goes through the trie.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request::request_id(&request);
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let (parts, body) = request.into_parts();
    let mut ctx = RequestContext::new(parts.method.as_str(), parts.uri.path());
    ctx.headers = parts.headers;
    ctx.remote_addr = remote_addr;
    ctx.request_id = request_id;

    let handler = match state.router.dispatch(&mut ctx) {
        Ok(handler) => Arc::clone(handler),
        Err(e) => {
            tracing::warn!(
                request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
                error = %e,
                "No route matched"
            );
            metrics::record_request(&ctx.method, 404, start_time);
            return response::not_found(&ctx.method, &ctx.path);
        }
    };

    ctx.body = match to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
                limit = state.max_body_size,
                error = %e,
                "Request body rejected"
            );
            metrics::record_request(&ctx.method, 413, start_time);
            return response::text(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large");
        }
    };

    tracing::debug!(
        request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
        method = %ctx.method,
        path = %ctx.path,
        params = ?ctx.path_params,
        "Dispatching request"
    );

    let method = ctx.method.clone();
    let response = handler(ctx).await;
    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}
