use pdfweb_api::{app_with_config, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfweb_api=debug,pdfweb=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let app = app_with_config(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;

    info!(
        soffice = %config.soffice.display(),
        max_images = config.pipeline.max_images,
        "pdfweb API listening on http://{}",
        config.bind
    );

    axum::serve(listener, app).await?;
    Ok(())
}
