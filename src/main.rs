use std::sync::Arc;

use message_relay::config::AppConfig;
use message_relay::gateway::CompletionGateway;
use message_relay::handlers::AppState;
use message_relay::llm::OpenAiClient;
use message_relay::routes::configure_routes;
use message_relay::store::{MessageStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("message_relay=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    let store_config =
        StoreConfig::from_url(&config.database_url)?.with_max_connections(config.db_max_connections);
    let store = MessageStore::connect(store_config).await?;

    let client = OpenAiClient::new(config.openai_api_key.clone(), config.openai_model.clone())?
        .with_base_url(config.openai_base_url.clone());
    let gateway = CompletionGateway::new(Arc::new(client)).with_system_prompt(config.system_prompt.clone());

    let routes = configure_routes(AppState::new(store, gateway));

    info!(
        addr = %config.bind_addr,
        database = %config.database_url,
        model = config.openai_model.as_str(),
        "starting server"
    );
    warp::serve(routes).run(config.bind_addr).await;

    Ok(())
}
