mod app;
mod config;
mod error;
mod logging;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config.log_file, &config.level)?;
    tracing::info!("starting against {}", config.base_url);

    let mut app = app::App::new(&config)?.with_base_url(config.base_url.clone());
    app.run()
}
