use std::{env, error::Error, net::SocketAddr, sync::Arc};

use feishu_relay::{config::RelayConfig, relay_router, state::RelayState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::fmt()
        .with_file(true)
        .init();

    let state = Arc::new(RelayState::new(RelayConfig::default()));

    let app = relay_router(state);

    let addr: SocketAddr = format!("[::]:{}", env::var("PORT").unwrap_or("3000".to_owned())).parse()?;

    tracing::info!("Listening on: {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
