use nowplaying_init::init;
use nowplaying_spotify_api::auth::orchestrator::AuthOrchestrator;
use nowplaying_spotify_api::config::Config;
use tracing::debug;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init()?;

    let config = Config::from_env()?;
    debug!(token_path = %config.token_path.display(), "Loaded config");

    AuthOrchestrator::new(config)
        .run(&mut std::io::stdout())
        .await
}
