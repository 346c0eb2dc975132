use color_eyre::eyre::eyre;
use color_eyre::Result;
use movies_now_core::{App, DetailView, DocumentTitle, Focus, Key, Panel, RatingView, ResultsView, DEFAULT_TITLE};
use owo_colors::OwoColorize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use super::{prompts, ui, Session};
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    Search,
    OpenResult,
    RemoveWatched,
    ToggleResults,
    ToggleWatched,
    Quit,
}

impl fmt::Display for MainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MainAction::Search => "Search movies",
            MainAction::OpenResult => "Open a result",
            MainAction::RemoveWatched => "Remove a watched movie",
            MainAction::ToggleResults => "Show/hide results",
            MainAction::ToggleWatched => "Show/hide watched list",
            MainAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MovieAction {
    Rate,
    Add,
    Close,
}

impl fmt::Display for MovieAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovieAction::Rate => "Rate",
            MovieAction::Add => "+ Add to list",
            MovieAction::Close => "← Back",
        };
        f.write_str(label)
    }
}

pub async fn run_interactive(output: &Output) -> Result<()> {
    if !ui::is_interactive() {
        return Err(eyre!(
            "The interactive session needs a terminal. Try 'moviesnow search <query>' instead."
        ));
    }

    let session = Session::load()?;
    let title: Arc<dyn DocumentTitle> = Arc::new(ui::TerminalTitle);
    title.set_title(DEFAULT_TITLE);
    let mut app = session.open_app(title)?;
    info!("Interactive session started with {} watched movies", app.watched().len());

    loop {
        render(&app, &session, output);

        let flow = if app.selected_id().is_some() {
            movie_menu(&mut app, &session, output).await?
        } else {
            main_menu(&mut app, output).await?
        };
        if flow == Flow::Quit {
            break;
        }
    }

    info!("Interactive session ended");
    Ok(())
}

fn render(app: &App, session: &Session, output: &Output) {
    output.println("");
    output.println(format!(
        "{}  {}",
        "🍿 Movies Now".bold().bright_cyan(),
        format!("Found {} results", app.num_results()).bright_black()
    ));

    match app.results_view() {
        ResultsView::Collapsed => output.println("[+] Results".bright_black().to_string()),
        ResultsView::Prompt => output.println("Search for a movie to get started"),
        ResultsView::Loading => output.println("Loading..."),
        ResultsView::Movies(movies) => output.table(&ui::results_table(&movies)),
        ResultsView::Error(message) => output.error(format!("⛔️ {}", message)),
        ResultsView::Empty if super::search::is_too_short(app.query(), session.config.search.min_query_length) => {
            output.println(format!(
                "Type at least {} characters to search",
                session.config.search.min_query_length
            ))
        }
        ResultsView::Empty => output.println("No movies found"),
    }

    match app.detail_view() {
        DetailView::Collapsed => output.println("[+] Watched".bright_black().to_string()),
        DetailView::Summary { summary, watched } => {
            output.table(&ui::summary_table(&summary));
            if !watched.is_empty() {
                output.table(&ui::watched_table(&watched));
            }
        }
        DetailView::Loading => output.println("Loading..."),
        DetailView::Failed(message) => output.error(format!("⛔️ {}", message)),
        DetailView::Movie { movie, rating } => {
            output.table(&ui::detail_table(&movie));
            match rating {
                RatingView::AlreadyRated(value) => {
                    output.println(format!("You rated this movie {} ⭐", value));
                }
                RatingView::Pending { .. } => {
                    output.println(ui::stars_line(app.rating_widget()));
                }
            }
        }
    }
}

async fn main_menu(app: &mut App, output: &Output) -> Result<Flow> {
    let actions = main_actions(
        app.num_results() > 0 && app.is_panel_open(Panel::Results),
        !app.watched().is_empty(),
    );

    let choice = prompts::prompt_choice("What next?", &actions, 0)?;
    let Some(action) = chosen_action(&actions, choice) else {
        // Esc with no movie open has nothing to close
        return Ok(Flow::Continue);
    };

    match action {
        MainAction::Search => search(app).await?,
        MainAction::OpenResult => open_result(app).await?,
        MainAction::RemoveWatched => remove_watched(app, output)?,
        MainAction::ToggleResults => {
            app.toggle_panel(Panel::Results);
        }
        MainAction::ToggleWatched => {
            app.toggle_panel(Panel::Watched);
        }
        MainAction::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn main_actions(can_open: bool, has_watched: bool) -> Vec<MainAction> {
    let mut actions = vec![MainAction::Search];
    if can_open {
        actions.push(MainAction::OpenResult);
    }
    if has_watched {
        actions.push(MainAction::RemoveWatched);
    }
    actions.extend([MainAction::ToggleResults, MainAction::ToggleWatched, MainAction::Quit]);
    actions
}

fn chosen_action(actions: &[MainAction], choice: Option<usize>) -> Option<MainAction> {
    choice.and_then(|idx| actions.get(idx).copied())
}

async fn search(app: &mut App) -> Result<()> {
    // Enter on the menu behaves like the global shortcut: focus and clear
    app.handle_key(Key::Enter);
    let query = prompts::prompt_string("Search movies", None);
    app.set_focus(Focus::None);

    app.set_query(query?.trim());
    ui::with_spinner("Searching...", app.search_settled()).await;
    Ok(())
}

async fn open_result(app: &mut App) -> Result<()> {
    let movies = app.search_state().movies;
    let labels: Vec<String> = movies
        .iter()
        .map(|m| format!("{} ({})", m.title, m.year))
        .collect();

    let Some(choice) = prompts::prompt_choice("Open", &labels, 0)? else {
        return Ok(());
    };

    app.select_movie(&movies[choice].imdb_id);
    ui::with_spinner("Loading movie...", app.detail_settled()).await;
    Ok(())
}

fn remove_watched(app: &mut App, output: &Output) -> Result<()> {
    let labels: Vec<String> = app
        .watched()
        .iter()
        .map(|m| format!("{} ({}) - {} ⭐", m.title, m.year, m.user_rating))
        .collect();

    let Some(choice) = prompts::prompt_choice("Remove", &labels, 0)? else {
        return Ok(());
    };
    let imdb_id = app.watched()[choice].imdb_id.clone();

    app.set_focus(Focus::OtherInput);
    let removed = app.delete_watched(&imdb_id, &prompts::confirm);
    app.set_focus(Focus::None);

    match removed {
        Ok(true) => output.success("Removed from your watched list"),
        Ok(false) => {}
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

async fn movie_menu(app: &mut App, session: &Session, output: &Output) -> Result<Flow> {
    let mut actions = Vec::new();
    if let DetailView::Movie {
        rating: RatingView::Pending { can_add, .. },
        ..
    } = app.detail_view()
    {
        actions.push(MovieAction::Rate);
        if can_add {
            actions.push(MovieAction::Add);
        }
    }
    actions.push(MovieAction::Close);

    let choice = prompts::prompt_choice("Movie", &actions, 0)?;
    let action = choice.map_or(MovieAction::Close, |idx| actions[idx]);

    match action {
        MovieAction::Rate => {
            app.set_focus(Focus::OtherInput);
            let picked = prompts::prompt_rating(session.config.rating.max_rating);
            app.set_focus(Focus::None);
            if let Some(value) = picked? {
                if let Err(e) = app.set_user_rating(value) {
                    output.error(e.to_string());
                }
            }
        }
        MovieAction::Add => match app.add_watched() {
            Ok(movie) => output.success(format!("Added {} to your watched list", movie.title)),
            Err(e) => {
                warn!("Add to watched list failed: {}", e);
                output.error(e.to_string());
            }
        },
        MovieAction::Close => {
            app.handle_key(Key::Escape);
        }
    }
    Ok(Flow::Continue)
}
