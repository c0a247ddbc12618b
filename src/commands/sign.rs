use eyre::Result;

use crate::config::Config;
use crate::webhook::signing;

pub fn run(body: Option<&str>, config: &Config) -> Result<()> {
    if config.webhook.secret.is_empty() {
        eyre::bail!("webhook.secret is not configured");
    }

    let body = super::read_input(body, "body")?;
    println!("{}", signing::signature_header(config.webhook.secret.expose(), body.as_bytes())?);

    Ok(())
}
