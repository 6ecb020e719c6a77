// rest/mod.rs — HTTP JSON API server.
//
// Axum router with five task routes behind the identity middleware, plus an
// unauthenticated health probe.
//
// Endpoints:
//   POST   /tasks
//   GET    /tasks?status=&priority=
//   GET    /tasks/{id}
//   PUT    /tasks/{id}
//   PATCH  /tasks/{id}
//   DELETE /tasks/{id}
//   GET    /health

pub mod auth;
pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{
    middleware,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("taskd listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let tasks = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_user,
        ));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health))
        .merge(tasks)
        .with_state(ctx)
}
