use super::{prompts, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;

pub async fn run_clear(all: bool, watched: bool, credentials: bool, yes: bool, output: &Output) -> Result<()> {
    if !(all || watched || credentials) {
        output.warn("No clear option specified. Use --watched, --credentials, or --all");
        output.println("\nExample: moviesnow clear --watched");
        return Ok(());
    }

    if !yes && !prompts::prompt_yes_no("This cannot be undone. Continue?", false)? {
        output.info("Nothing cleared");
        return Ok(());
    }

    let session = Session::load_for_editing()?;

    if all || watched {
        clear_watched(&session, output)?;
    }
    if all || credentials {
        clear_credentials(&session, output)?;
    }

    Ok(())
}

fn clear_watched(session: &Session, output: &Output) -> Result<()> {
    let mut watched = session.watched_list()?;
    if watched.is_empty() {
        output.info("Watched list is already empty");
        return Ok(());
    }

    let count = watched.len();
    watched
        .clear()
        .map_err(|e| eyre!("Failed to clear watched list: {}", e))?;
    output.success(format!("Removed {} movies from your watched list", count));
    Ok(())
}

fn clear_credentials(session: &Session, output: &Output) -> Result<()> {
    let credentials_file = session.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
