//! show_finder - Search a TV show catalog and browse episodes
//!
//! This library queries the TVMaze API for shows matching a search term and
//! for the episodes of a selected show. Upstream records are normalized into
//! fully populated [`Show`], [`ShowDetail`] and [`Episode`] values, and a
//! [`ViewModel`] keeps presentation state consistent when requests overlap.
//!
//! # Examples
//!
//! ```no_run
//! use show_finder::{CatalogProvider, ErrorKind, TvMazeProvider};
//!
//! let provider = TvMazeProvider::new();
//! match provider.search_shows("girls") {
//!     Ok(shows) => {
//!         for show in shows {
//!             println!("{} ({}) - {}", show.name, show.year, show.rating);
//!         }
//!     }
//!     Err(e) if e.kind() == ErrorKind::EmptyResult => println!("Not Found!"),
//!     Err(e) => eprintln!("Error! {}", e),
//! }
//! ```

mod catalog;
pub mod render;
mod view_model;

pub use catalog::{
    CatalogError, CatalogProvider, DEFAULT_BASE_URL, DEFAULT_IMAGE_URL, Episode, ErrorKind,
    SUMMARY_LIMIT, SUMMARY_PLACEHOLDER, Show, ShowDetail, TRUNCATION_SUFFIX, TvMazeProvider,
};
pub use view_model::{EpisodesToken, EpisodesView, SearchToken, ShowsView, ViewModel};
