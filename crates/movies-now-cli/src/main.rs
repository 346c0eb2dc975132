use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, interactive, rate, search, show, watched};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviesnow")]
#[command(about = "Movies Now - Search movies, rate them and keep a watched list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse, rate and manage movies interactively (default)
    #[command(long_about = "Start an interactive session: search as you type, open a movie to see its details, rate it and add it to your watched list. Press Esc to close an open movie.")]
    Interactive,

    /// Search movies by title
    Search {
        /// Title to search for (at least 3 characters by default)
        query: String,
    },

    /// Show details for a movie
    Show {
        /// IMDb id, e.g. tt0848228
        imdb_id: String,
    },

    /// Rate a movie and add it to the watched list
    Rate {
        /// IMDb id, e.g. tt0848228
        imdb_id: String,

        /// Your rating
        #[arg(value_parser = clap::value_parser!(u8).range(1..))]
        rating: u8,
    },

    /// Inspect and manage the watched list
    Watched {
        #[command(subcommand)]
        cmd: Option<WatchedCommands>,
    },

    /// Configure the API key and settings
    #[command(long_about = "Manage configuration and credentials for Movies Now. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Clear stored data
    #[command(long_about = "Clear the watched list or stored credentials. Use --watched to empty the watched list, --credentials to remove the stored API key, or --all for both.")]
    Clear {
        /// Clear the watched list and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Empty the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Remove stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchedCommands {
    /// List watched movies
    List,

    /// Show averages over the watched list
    Summary,

    /// Remove a movie from the watched list
    Remove {
        imdb_id: String,

        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Export the watched list as CSV
    Export {
        /// Destination file
        path: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the OMDb API key
    #[command(long_about = "Store the OMDb API key in the credentials file. Get a free key at https://www.omdbapi.com/apikey.aspx. The OMDB_API_KEY environment variable takes precedence over the stored key.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },

    /// Change a setting, e.g. `search.debounce_ms 300`
    Set {
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive);

    // Interactive sessions log to a file so prompts stay readable
    let log_file = match command {
        Commands::Interactive => Some(movies_now_config::PathManager::default().session_log_file()),
        _ => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match command {
        Commands::Interactive => interactive::run_interactive(&output).await,
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Show { imdb_id } => show::run_show(&imdb_id, &output).await,
        Commands::Rate { imdb_id, rating } => rate::run_rate(&imdb_id, rating, &output).await,
        Commands::Watched { cmd } => watched::run_watched(cmd.unwrap_or(WatchedCommands::List), &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { all, watched, credentials, yes } => clear::run_clear(all, watched, credentials, yes, &output).await,
    }
}
