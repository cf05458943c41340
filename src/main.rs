mod animation;
mod app;
mod config;
mod geometry;
mod models;
mod ui;

use anyhow::Context;

use app::SnakeyApp;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snakey=info".parse().context("invalid default log directive")?),
        )
        .init();

    let config = AppConfig::from_env().context("invalid SNAKEY_* configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let app = SnakeyApp::new(config);
    let code = app.run();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
