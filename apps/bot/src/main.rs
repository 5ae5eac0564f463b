use reprezzent_assistant_client::AssistantClient;
use reprezzent_bot::commands::Router;
use reprezzent_bot::config::Config;
use reprezzent_bot::services::{BalabobaClient, WeatherClient};
use reprezzent_bot::sessions::SessionRegistry;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Actor identity for the line-based console transport
const CONSOLE_ACTOR: i64 = 0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reprezzent_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.common.environment,
        page_size = config.page_size,
        "Starting Reprezzent bot"
    );

    let sessions = SessionRegistry::new(
        config.common.catalog.clone(),
        config.common.downloads.clone(),
        config.page_size,
    );

    let assistant = match &config.common.assistant {
        Some(assistant_config) => Some(AssistantClient::new(assistant_config)?),
        None => None,
    };
    let weather = match &config.weather_api_key {
        Some(key) => Some(WeatherClient::new(key)?),
        None => None,
    };
    let balaboba = match &config.balaboba_url {
        Some(url) => Some(BalabobaClient::with_base_url(url)?),
        None => None,
    };

    let router = Router::new(sessions, assistant, weather, balaboba);

    // Line-based console transport: one fixed actor, one message per line.
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = router.dispatch(CONSOLE_ACTOR, &line).await;
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}
