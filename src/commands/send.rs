use colored::*;
use eyre::{Context, Result};

use crate::config::Config;
use crate::event::EventCategory;
use crate::webhook::{Dispatcher, parse_fields};

pub fn run(action: &str, data: Option<&str>, quiet: bool, config: &Config) -> Result<()> {
    config.webhook.validate().context("Webhook is not configured")?;

    if action.trim().is_empty() {
        eyre::bail!("Action must not be empty");
    }

    let data = super::read_input(data, "data")?;
    let fields = if data.trim().is_empty() {
        Default::default()
    } else {
        parse_fields(&data)?
    };

    // Known categories honour their enable flag; only unknown actions go straight through
    if let Some(category) = EventCategory::parse_str(action) {
        if !config.events.is_enabled(category) {
            log::debug!("{} is disabled, not dispatching", category);
            if !quiet {
                println!("{} {} is disabled", "⚠".yellow(), category.to_string().cyan());
            }
            return Ok(());
        }
    }

    log::info!("Sending raw {} with {} field(s)", action, fields.len());
    Dispatcher::with_http(config.webhook.clone()).dispatch(action, &fields);

    if !quiet {
        println!("{} {} dispatched", "→".blue(), action.cyan());
    }

    Ok(())
}
