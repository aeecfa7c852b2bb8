use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Process bootstrap shared by every binary in the workspace.
///
/// Loads `.env`, installs the eyre report handler and a stderr tracing
/// subscriber. Stdout stays reserved for user-facing output.
pub fn init() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .without_time()
        .init();

    Ok(())
}
