use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>>
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = quarrel::config::QuarrelConfig::from_env();
    info!(
      "Starting quarrel (provider: {}, bind: {})",
      config.provider, config.bind_addr
    );

    if let Err(e) = quarrel::server::serve(config).await
    {   error!("quarrel exited: {}", e);
        return Err(e.into());
    }
    Ok(())
}
