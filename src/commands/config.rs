use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;
use crate::event::EventCategory;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Path => path(),
        ConfigAction::Check => check(config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    let config = config.redacted();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
        OutputFormat::Text => {
            println!("{}", "hookrelay Configuration".bold());
            println!();

            println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
            println!();

            println!("{}:", "webhook".cyan());
            println!("  endpoint_url: {}", config.webhook.endpoint_url);
            println!("  secret: {}", config.webhook.secret.expose());
            println!("  timeout_secs: {}", config.webhook.timeout_secs);
            println!();

            println!("{}:", "events".cyan());
            for category in EventCategory::ALL {
                println!("  {}: {}", category, config.events.is_enabled(category));
            }
        }
    }

    Ok(())
}

fn path() -> Result<()> {
    if let Ok(env_path) = std::env::var("HOOKRELAY_CONFIG") {
        println!("{} (HOOKRELAY_CONFIG)", env_path);
    }
    for candidate in Config::candidate_paths() {
        let marker = if candidate.exists() { "✓".green() } else { "·".dimmed() };
        println!("{} {}", marker, candidate.display());
    }
    Ok(())
}

fn check(config: &Config) -> Result<()> {
    config.webhook.validate()?;
    println!("{} Webhook delivers to {}", "✓".green(), config.webhook.endpoint_url);
    Ok(())
}
