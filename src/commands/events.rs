use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::event::EventCategory;

#[derive(Debug, Serialize)]
struct CategoryInfo {
    action: EventCategory,
    enabled: bool,
    fields: &'static [&'static str],
}

fn categories(config: &Config) -> Vec<CategoryInfo> {
    EventCategory::ALL
        .into_iter()
        .map(|category| CategoryInfo {
            action: category,
            enabled: config.events.is_enabled(category),
            fields: category.field_names(),
        })
        .collect()
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let infos = categories(config);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&infos)?);
        }
        OutputFormat::Text => {
            println!("{}", "Event categories".bold());
            println!();

            for info in &infos {
                let marker = if info.enabled { "✓".green() } else { "✗".red() };
                println!("  {} {}", marker, info.action.to_string().cyan());
                println!("    {}", info.fields.join(", ").dimmed());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_reflect_config() {
        let mut config = Config::default();
        config.events.blocked_user = false;

        let infos = categories(&config);
        assert_eq!(infos.len(), 8);

        let blocked = infos.iter().find(|i| i.action == EventCategory::BlockedUser).unwrap();
        assert!(!blocked.enabled);
        assert_eq!(blocked.fields, &["user", "operator"]);
    }

    #[test]
    fn test_json_uses_action_names() {
        let json = serde_json::to_string(&categories(&Config::default())).unwrap();
        assert!(json.contains(r#""action":"ProtectedArticle""#));
    }
}
