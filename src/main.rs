use std::sync::Arc;

use tokio::net::TcpListener;

use coverletter::{
    create_router, init_tracing,
    services::{GeminiClient, PdfProcessor},
    AppState, Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    init_tracing("coverletter=debug,tower_http=debug,axum::rejection=trace");

    let config = Config::from_env()?;

    tracing::info!("Starting cover letter generator");
    tracing::info!("Model: {}", config.gemini_model);
    tracing::info!("Max upload size: {}MB", config.max_upload_size_mb);
    tracing::info!("PDF processor available: {}", PdfProcessor::default().is_available());

    let generator = GeminiClient::from_config(&config)?;
    let state = AppState::new(Arc::new(generator));
    let app = create_router(state, &config);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
