use eyre::{Context, Result};
use std::io::{self, Read};

pub mod completions;
pub mod config;
pub mod emit;
pub mod events;
pub mod send;
pub mod sign;
pub mod verify;

/// Use the inline argument, or read all of stdin when it is absent
pub(crate) fn read_input(inline: Option<&str>, what: &str) -> Result<String> {
    match inline {
        Some(value) => Ok(value.to_string()),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context(format!("Failed to read {} from stdin", what))?;
            Ok(buffer)
        }
    }
}
