mod api;
mod core;
mod infra;
mod models;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::api::chat::{chat_endpoint, root_status};
use crate::infra::config::Settings;

pub mod ax_state {
    use crate::infra::config::Settings;

    pub struct AppState {
        pub settings: Settings,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;
    let addr = settings.bind_addr;

    // 只放行本地 UI 的固定来源，方法与请求头全放开
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(settings.allowed_origins.clone()))
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(ax_state::AppState { settings });

    let app = Router::new()
        .route("/", get(root_status))
        .route("/chat", post(chat_endpoint))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    println!("🚀 DSCPL Backend 运行在 http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
