use funnel_api::app::{AppConfig, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    funnel_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using the development secret");
        "dev-secret".to_string()
    });

    let ttl_hours: i64 = std::env::var("TOKEN_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24);

    let app = build_app(AppConfig {
        jwt_secret,
        token_ttl: chrono::Duration::hours(ttl_hours),
    });

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "funnel api listening");

    axum::serve(listener, app).await?;
    Ok(())
}
