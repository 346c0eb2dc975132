use super::{prompts, ui, Session};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use movies_now_config::{Config, OMDB_API_KEY_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let session = Session::load_for_editing()?;
    match cmd {
        ConfigCommands::Show { full } => show_config(&session, full, output),
        ConfigCommands::ApiKey { key } => configure_api_key(session, key, output),
        ConfigCommands::Set { key, value } => set_value(session, &key, &value, output),
    }
}

fn show_config(session: &Session, full: bool, output: &Output) -> Result<()> {
    let config = &session.config;
    let api_key = session.credentials.resolve_omdb_api_key().unwrap_or_default();
    let api_key_display = if full { api_key.clone() } else { ui::mask_string(&api_key) };
    let key_source = if std::env::var(OMDB_API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        "environment"
    } else if session.credentials.get_omdb_api_key().is_some() {
        "credentials file"
    } else {
        "not set"
    };

    output.json(&json!({
        "config_file": session.paths.config_file(),
        "store_dir": session.paths.store_dir(),
        "omdb": {
            "base_url": config.omdb.base_url,
            "timeout_seconds": config.omdb.timeout_seconds,
            "api_key": api_key_display,
            "api_key_source": key_source,
        },
        "search": {
            "min_query_length": config.search.min_query_length,
            "debounce_ms": config.search.debounce_ms,
        },
        "storage": { "watched_key": config.storage.watched_key },
        "rating": { "max_rating": config.rating.max_rating, "size": config.rating.size },
    }));

    ui::print_section_header("Configuration", output);

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    let rows = [
        ("Config file", session.paths.config_file().display().to_string()),
        ("Store", session.paths.store_dir().display().to_string()),
        ("omdb.base_url", config.omdb.base_url.clone()),
        ("omdb.timeout_seconds", config.omdb.timeout_seconds.to_string()),
        ("OMDb API key", format!("{} ({})", api_key_display, key_source)),
        ("search.min_query_length", config.search.min_query_length.to_string()),
        ("search.debounce_ms", config.search.debounce_ms.to_string()),
        ("storage.watched_key", config.storage.watched_key.clone()),
        ("rating.max_rating", config.rating.max_rating.to_string()),
        ("rating.size", config.rating.size.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.table(&table);

    if let Some(updated) = session.credentials.get_omdb_api_key_updated() {
        output.println(format!("{}", format!("API key stored {}", updated.format("%Y-%m-%d %H:%M UTC")).bright_black()));
    }

    Ok(())
}

fn configure_api_key(mut session: Session, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => {
            ui::print_section_header("OMDb API key", output);
            output.println("Get a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_secret("API key")?
        }
    };

    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    session.credentials.set_omdb_api_key(key);
    session
        .credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "API key saved to {}",
        session.paths.credentials_file().display()
    ));
    if std::env::var(OMDB_API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", OMDB_API_KEY_ENV));
    }
    Ok(())
}

fn set_value(mut session: Session, key: &str, value: &str, output: &Output) -> Result<()> {
    apply_setting(&mut session.config, key, value)?;
    session
        .config
        .validate()
        .map_err(|e| eyre!("Invalid value for {}: {}", key, e))?;

    let config_file = session.paths.config_file();
    session
        .config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("{} = {}", key, value));
    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
        value
            .trim()
            .parse()
            .map_err(|_| eyre!("'{}' is not a valid value for {}", value, key))
    }

    match key {
        "omdb.base_url" => config.omdb.base_url = value.trim().to_string(),
        "omdb.timeout_seconds" => config.omdb.timeout_seconds = parse(key, value)?,
        "search.min_query_length" => config.search.min_query_length = parse(key, value)?,
        "search.debounce_ms" => config.search.debounce_ms = parse(key, value)?,
        "storage.watched_key" => config.storage.watched_key = value.trim().to_string(),
        "rating.max_rating" => config.rating.max_rating = parse(key, value)?,
        "rating.size" => config.rating.size = parse(key, value)?,
        _ => return Err(eyre!("Unknown setting: {}", key)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();
        apply_setting(&mut config, "search.debounce_ms", "300").unwrap();
        apply_setting(&mut config, "rating.max_rating", " 5 ").unwrap();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.rating.max_rating, 5);
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "rating.max_rating", "many").is_err());
        assert!(apply_setting(&mut config, "nope", "1").is_err());
        assert_eq!(config.rating.max_rating, 10);
    }
}
