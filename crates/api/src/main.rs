use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use holistica_api::{cors_layer, create_router, AppState};
use holistica_core::config::Settings;
use holistica_core::pipeline::MockPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    // Sentry must be initialized before the subscriber so the tracing layer has a client.
    let _sentry_guard = settings.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if let Err(e) = run(settings).await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "api exited with error");
        return Err(e);
    }

    Ok(())
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let cors = cors_layer(&settings.cors)?;
    if cors.is_none() {
        tracing::warn!("CORS_ALLOW_ORIGINS is empty; cross-origin requests are not allowed");
    }

    let pipeline = MockPipeline::from_settings(&settings);
    tracing::info!(
        simulate_latency = pipeline.simulates_latency(),
        cors_origins = ?settings.cors.allow_origins,
        "analysis pipeline ready"
    );

    let app = create_router(AppState { pipeline }, cors);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "api listening");

    // In-flight analyses finish their staged delays before the server exits.
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("ctrl-c received; draining in-flight requests"),
                Err(e) => {
                    tracing::error!(error = %e, "failed to listen for ctrl-c; serving until killed");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
        .context("server error")?;

    tracing::info!("api stopped");
    Ok(())
}
