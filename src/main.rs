use clap::{Parser, Subcommand};
use show_finder::render::{render_episodes, render_shows};
use show_finder::{DEFAULT_BASE_URL, EpisodesView, ShowsView, TvMazeProvider, ViewModel};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "show-finder")]
#[command(about = "Search the TVMaze catalog and list episodes", long_about = None)]
struct Args {
    /// Base URL of the catalog API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for shows by name
    Search {
        /// Free-text search term
        #[arg(default_value = "A")]
        term: String,
    },
    /// Show a show's details followed by its episodes
    Episodes {
        /// TVMaze show id, as printed by `search`
        show_id: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "show_finder=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let provider = TvMazeProvider::with_base_url(args.base_url);
    let mut view = ViewModel::new();

    let failed = match args.command {
        Command::Search { term } => {
            let shows = view.search(&provider, &term);
            println!("{}", render_shows(shows));
            matches!(shows, ShowsView::Failed(_))
        }
        Command::Episodes { show_id } => {
            let episodes = view.open_show(&provider, show_id);
            println!("{}", render_episodes(episodes));
            matches!(episodes, EpisodesView::Failed(_))
        }
    };

    if failed {
        process::exit(1);
    }
}
