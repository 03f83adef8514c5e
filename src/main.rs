use anyhow::Context;
use clap::Parser;
use maps_directions::core::dispatcher::apply_update;
use maps_directions::core::ConfigProvider;
use maps_directions::utils::{logger, validation::Validate};
use maps_directions::{CliConfig, ConsoleSurface, HttpFetcher, RouteDispatcher, RouteService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::info!("Starting maps-directions");

    if let Err(e) = config
        .apply_file_defaults()
        .and_then(|_| config.validate())
    {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let origin = config.origin.context("origin was not resolved")?;
    let destination = config.destination;
    let json = config.json;

    let fetcher = HttpFetcher::new(config.timeout()).context("creating HTTP client")?;
    let service = RouteService::new(fetcher, config);
    let (dispatcher, mut updates) = RouteDispatcher::new(service);

    tracing::info!("Requesting route {} -> {}", origin, destination);
    dispatcher.request(origin, destination);

    let update = updates
        .recv()
        .await
        .context("route request ended without a result")?;

    let failure = update.result.as_ref().err().map(|e| {
        tracing::error!("❌ Route request failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        if e.is_retryable() {
            2
        } else {
            1
        }
    });

    let mut surface = ConsoleSurface::stdout(json);
    if apply_update(update, &mut surface) {
        tracing::info!("✅ Route rendered");
    }

    if let Some(exit_code) = failure {
        std::process::exit(exit_code);
    }

    Ok(())
}
