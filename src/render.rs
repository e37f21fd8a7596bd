//! Terminal rendering of view state
//!
//! Turns [`ShowsView`] and [`EpisodesView`] into plain text. Upstream
//! summaries are HTML and are converted to text before display.

use crate::catalog::{Episode, Show, ShowDetail};
use crate::view_model::{EpisodesView, ShowsView};
use std::fmt::Write;

/// Message shown when a search matched nothing.
pub const NOT_FOUND_MESSAGE: &str = "Not Found!";

/// Message shown when a show has no episodes.
pub const NO_EPISODES_MESSAGE: &str = "No episode!";

/// Converts an HTML summary into a single trimmed line of text.
fn plain_summary(summary: &str) -> String {
    nanohtml2text::html2text(summary)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn error_message(detail: &str) -> String {
    format!("Error! {}", detail)
}

fn rating_line(rating: f64) -> String {
    format!("Rating : {} \u{272E}", rating)
}

/// Renders a show as a card of labelled lines.
pub fn render_show_card(show: &Show) -> String {
    let mut card = String::new();
    let _ = writeln!(card, "[{}] {}", show.id, show.name);
    let _ = writeln!(card, "  {}", show.year);
    let _ = writeln!(card, "  {}", show.genres.join(", "));
    let _ = writeln!(card, "  {}", rating_line(show.rating));
    let _ = writeln!(card, "  {}", plain_summary(&show.summary));
    let _ = writeln!(card, "  {}", show.image);
    card
}

/// Renders the header above an episode listing.
pub fn render_show_header(show: &ShowDetail) -> String {
    let mut header = String::new();
    let _ = writeln!(header, "=== {} ===", show.name);
    let _ = writeln!(header, "{}", show.year);
    let _ = writeln!(header, "{}", show.genres.join(", "));
    let _ = writeln!(header, "{}", rating_line(show.rating));
    let _ = writeln!(header, "{}", show.image);
    let _ = writeln!(header);
    let _ = writeln!(header, "{}", plain_summary(&show.summary));
    header
}

/// Renders one episode as `S{season}: Ep-{number}  {name}`.
pub fn render_episode_line(episode: &Episode) -> String {
    format!(
        "S{}: Ep-{}  {}  <{}>",
        episode.season, episode.number, episode.name, episode.image
    )
}

pub fn render_shows(view: &ShowsView) -> String {
    match view {
        ShowsView::Idle => String::new(),
        ShowsView::Loaded(shows) => shows
            .iter()
            .map(render_show_card)
            .collect::<Vec<_>>()
            .join("\n"),
        ShowsView::NotFound => NOT_FOUND_MESSAGE.to_string(),
        ShowsView::Failed(detail) => error_message(detail),
    }
}

pub fn render_episodes(view: &EpisodesView) -> String {
    match view {
        EpisodesView::Hidden => String::new(),
        EpisodesView::Loaded { show, episodes } => {
            let mut out = render_show_header(show);
            out.push('\n');
            for episode in episodes {
                out.push_str(&render_episode_line(episode));
                out.push('\n');
            }
            out
        }
        EpisodesView::NoEpisodes { show } => {
            format!("{}\n{}\n", render_show_header(show), NO_EPISODES_MESSAGE)
        }
        EpisodesView::Failed(detail) => error_message(detail),
    }
}
