use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Confirmation used by the delete flow. A failed read counts as "no".
pub fn confirm(message: &str) -> bool {
    prompt_yes_no(message, false).unwrap_or(false)
}

/// Pick one of `items`. Esc returns `None`.
pub fn prompt_choice<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Prompt for a rating between 1 and `max`. Empty input or Esc cancels.
pub fn prompt_rating(max: u8) -> Result<Option<u8>> {
    let input = Input::<String>::new()
        .with_prompt(format!("Your rating (1-{}, empty to cancel)", max))
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(());
            }
            match trimmed.parse::<u8>() {
                Ok(n) if (1..=max).contains(&n) => Ok(()),
                _ => Err(format!("Enter a whole number between 1 and {}", max)),
            }
        })
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))?;

    Ok(input.trim().parse::<u8>().ok())
}
