use comfy_table::{presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, Attribute, Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use movies_now_core::{DocumentTitle, StarRating};
use movies_now_models::{MovieDetail, SearchResult, WatchSummary, WatchedMovie};
use owo_colors::OwoColorize;
use std::future::Future;
use std::io::{IsTerminal, Write};
use std::time::Duration;

use crate::output::Output;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Run `fut` behind a spinner when attached to a terminal.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    if !is_interactive() {
        tracing::info!(operation = "progress", message = %message, "Waiting");
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let out = fut.await;
    spinner.finish_and_clear();
    out
}

/// Window title of the controlling terminal, set through the OSC 0 escape.
pub struct TerminalTitle;

impl DocumentTitle for TerminalTitle {
    fn set_title(&self, title: &str) {
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        let _ = write!(stderr, "\x1b]0;{}\x07", title);
        let _ = stderr.flush();
    }
}

fn styled(mut table: Table) -> Table {
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(format!("{}", title.bold().bright_cyan()));
    output.println(format!("{}", "─".repeat(title.chars().count()).bright_cyan()));
}

pub fn results_table(movies: &[SearchResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("IMDb id")]);
    for (idx, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(&movie.imdb_id),
        ]);
    }
    styled(table)
}

pub fn detail_table(movie: &MovieDetail) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header(movie.display_title().unwrap_or("Untitled")), Cell::new("")]);

    let runtime = movie.runtime_minutes.map(|m| format!("{} min", m));
    let rating = movie.imdb_rating.map(|r| format!("⭐ {:.1} IMDb rating", r));
    let year = Some(movie.year.clone()).filter(|y| !y.is_empty());
    let rows = [
        ("Year", year.as_deref()),
        ("Released", movie.released.as_deref()),
        ("Runtime", runtime.as_deref()),
        ("Genre", movie.genre.as_deref()),
        ("Rating", rating.as_deref()),
        ("Director", movie.director.as_deref()),
        ("Starring", movie.actors.as_deref()),
        ("Plot", movie.plot.as_deref()),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
        }
    }
    styled(table)
}

pub fn watched_table(watched: &[WatchedMovie]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header("Title"),
        header("Year"),
        header("IMDb"),
        header("Yours"),
        header("Runtime"),
        header("IMDb id"),
    ]);
    for movie in watched {
        table.add_row(vec![
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(movie.imdb_rating.map_or("-".to_string(), |r| format!("{:.1}", r))),
            Cell::new(movie.user_rating),
            Cell::new(movie.runtime.map_or("-".to_string(), |m| format!("{} min", m))),
            Cell::new(&movie.imdb_id),
        ]);
    }
    styled(table)
}

pub fn summary_table(summary: &WatchSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header("Movies you watched"), Cell::new("")]);
    table.add_row(vec![Cell::new("Movies"), Cell::new(summary.count)]);
    table.add_row(vec![Cell::new("IMDb rating"), Cell::new(format!("{:.2}", summary.avg_imdb_rating))]);
    table.add_row(vec![Cell::new("Your rating"), Cell::new(format!("{:.2}", summary.avg_user_rating))]);
    table.add_row(vec![Cell::new("Runtime"), Cell::new(format!("{:.0} min", summary.avg_runtime))]);
    styled(table)
}

pub fn stars_line(stars: &StarRating) -> String {
    let label = stars.label();
    if label.is_empty() {
        format!("{}", stars.render().yellow())
    } else {
        format!("{} {}", stars.render().yellow(), label)
    }
}

pub fn mask_string(s: &str) -> String {
    let len = s.chars().count();
    if len == 0 {
        return "<not set>".to_string();
    }
    if len <= 4 {
        return "*".repeat(len);
    }
    let head: String = s.chars().take(2).collect();
    let tail: String = s.chars().skip(len - 2).collect();
    format!("{}***{}", head, tail)
}
