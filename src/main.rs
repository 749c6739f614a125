mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::llm::LlmComplete;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize LLM client (non-fatal: the diagram endpoint answers 503
    // until the environment is configured).
    let llm: Option<Arc<dyn LlmComplete>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — diagram generation disabled");
            None
        }
    };

    let state = state::AppState::new(llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "erdraft listening");
    axum::serve(listener, app).await.expect("server failed");
}
