use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::webhook::signing;

pub fn run(signature: &str, body: Option<&str>, quiet: bool, config: &Config) -> Result<()> {
    if config.webhook.secret.is_empty() {
        eyre::bail!("webhook.secret is not configured");
    }

    let body = super::read_input(body, "body")?;

    if !signing::verify_signature(config.webhook.secret.expose(), body.as_bytes(), signature) {
        eyre::bail!("Signature does not match body");
    }

    if !quiet {
        println!("{} Signature valid", "✓".green());
    }

    Ok(())
}
