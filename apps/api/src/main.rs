use trellis_api::AppModule;
use trellis_core::AppConfigTrait;
use trellis_http::{init_logging, HttpConfig, LoggingConfig, TrellisFactory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::development())?;

    let config = HttpConfig::from_env()?;
    let port = config.port;

    let app = TrellisFactory::create_with_config::<AppModule>(config)?;
    app.listen(port).await?;

    Ok(())
}
