mod move_handler;
mod server_config;
mod web_server;

use clap::Parser;
use common::config::Validate;
use common::{log, logger};
use server_config::{DEFAULT_CONFIG_FILE, ServerConfig, get_config_manager};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// YAML config file; defaults apply when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Overrides the configured listen address.
    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Writes the default config to `--config` and exits.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);

    if args.write_default_config {
        config_manager.set_config(&ServerConfig::default())?;
        log!("Default config written to {}", config_manager.source());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(address) = args.address {
        config.address = address;
        config.validate()?;
    }

    log!("Config loaded from {}", config_manager.source());
    log!(
        "Bot settings: mistake rate {}, blunder rate {}, opening {:?}",
        config.bot.mistake_rate,
        config.bot.blunder_rate,
        config.bot.opening_policy
    );
    if let Some(seed) = config.rng_seed {
        log!("Using fixed RNG seed {}", seed);
    }

    let shutdown_signal = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log!("Shutdown signal received"),
            Err(e) => {
                log!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    run_web_server(config, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
