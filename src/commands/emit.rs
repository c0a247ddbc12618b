use colored::*;
use eyre::{Context, Result};

use crate::config::Config;
use crate::event::{DomainEvent, Outcome, Relay};
use crate::webhook::Dispatcher;

pub fn run(payload: Option<&str>, quiet: bool, config: &Config) -> Result<()> {
    // Fail on bad config before touching the event
    config.webhook.validate().context("Webhook is not configured")?;

    let payload = super::read_input(payload, "event")?;
    let event: DomainEvent = serde_json::from_str(&payload).context("Failed to parse event JSON")?;

    log::info!("Received {} event", event.category());

    let relay = Relay::new(config.events.clone(), Dispatcher::with_http(config.webhook.clone()));
    let outcome = relay.relay(&event);

    if !quiet {
        match outcome {
            Outcome::Dispatched(category) => println!("{} {} dispatched", "→".blue(), category.to_string().cyan()),
            Outcome::Disabled(category) => println!("{} {} is disabled", "⚠".yellow(), category.to_string().cyan()),
            Outcome::Suppressed(category, reason) => {
                println!("{} {} suppressed: {}", "⚠".yellow(), category.to_string().cyan(), reason)
            }
        }
    }

    Ok(())
}
