use std::sync::Arc;

use anyhow::Context;
use api::config::{Config, LogFormat, StorageBackend};
use api::state::AppState;
use shared::repositories::in_memory_user_repository::InMemoryUserRepository;
use shared::repositories::user_repository::{DynamoDbUserRepository, UserRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Plain => builder.init(),
    }
}

async fn build_repository(config: &Config) -> Arc<dyn UserRepository + Send + Sync> {
    match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryUserRepository::new()),
        StorageBackend::DynamoDb => {
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            Arc::new(DynamoDbUserRepository::new(client, config.users_table.clone()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(config.log_format);

    let repository = build_repository(&config).await;
    let app = api::create_app(AppState::new(repository, config.storage));

    if std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        info!("Starting users API on the Lambda runtime ({:?} storage)", config.storage);
        lambda_http::run(app)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        let listener = tokio::net::TcpListener::bind(&config.bind_address)
            .await
            .with_context(|| format!("failed to bind {}", config.bind_address))?;
        info!(
            "Users API listening on {} ({:?} storage)",
            config.bind_address, config.storage
        );
        axum::serve(listener, app).await?;
    }
    Ok(())
}
