//! Data structures and traits for querying the show catalog.
//!
//! This module provides the normalized show, show detail and episode records
//! handed to the presentation layer, the error taxonomy for catalog lookups,
//! and the trait implemented by catalog providers.

mod normalize;
mod tvmaze;
mod tvmaze_types;

pub use normalize::{
    DEFAULT_IMAGE_URL, SUMMARY_LIMIT, SUMMARY_PLACEHOLDER, TRUNCATION_SUFFIX,
};
pub use tvmaze::{DEFAULT_BASE_URL, TvMazeProvider};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request to the catalog failed or returned a non-success status
    #[error("Request failed: {0}")]
    Request(String),

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// The search succeeded but matched no shows
    #[error("No shows found for '{0}'")]
    NoShowsFound(String),

    /// The show exists but has no episodes listed
    #[error("No episodes found for show {0}")]
    NoEpisodesFound(u32),
}

/// Coarse classification of a [`CatalogError`].
///
/// An empty result is an expected outcome the caller should present as
/// "not found", while a network failure carries detail worth showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, non-success status or malformed response
    Network,
    /// Upstream answered successfully with zero items
    EmptyResult,
}

impl CatalogError {
    /// Returns whether this is an empty result or a network failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Request(_) | CatalogError::Parse(_) => ErrorKind::Network,
            CatalogError::NoShowsFound(_) | CatalogError::NoEpisodesFound(_) => {
                ErrorKind::EmptyResult
            }
        }
    }
}

/// A show as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Upstream show id
    pub id: u32,
    /// The show title
    pub name: String,
    /// Genre labels in upstream order
    pub genres: Vec<String>,
    /// Average rating, 0 if unrated
    pub rating: f64,
    /// Premiere year, 0 if unknown
    pub year: u32,
    /// HTML summary, shortened for list display
    pub summary: String,
    /// Medium-sized poster URL
    pub image: String,
}

/// Full show record used as the header of an episode listing.
///
/// Unlike [`Show`], the summary is kept whole and the image prefers the
/// original resolution poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetail {
    pub id: u32,
    pub name: String,
    pub genres: Vec<String>,
    pub rating: f64,
    pub year: u32,
    pub summary: String,
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Upstream episode id
    pub id: u32,
    /// The episode title
    pub name: String,
    /// The season number this episode belongs to
    pub season: u32,
    /// The episode number within the season (0 for unnumbered specials)
    pub number: u32,
    /// HTML summary of the episode
    pub summary: String,
    /// Still image URL
    pub image: String,
}

/// Trait for catalog providers that can look up shows and episodes.
///
/// Every method performs exactly one upstream request. Results are fully
/// normalized; no field of a returned record is ever left empty because
/// upstream omitted it.
pub trait CatalogProvider {
    /// Searches for shows matching a free-text term.
    ///
    /// # Arguments
    ///
    /// * `term` - The search term, sent as-is (an empty term is not rejected)
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoShowsFound`] when nothing matches, or a
    /// network-kind error when the request or decoding fails.
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError>;

    /// Lists all episodes of a show in upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoEpisodesFound`] when the show has no
    /// episodes, or a network-kind error when the request or decoding fails.
    fn list_episodes(&self, show_id: u32) -> Result<Vec<Episode>, CatalogError>;

    /// Fetches the full record of a single show.
    fn show_detail(&self, show_id: u32) -> Result<ShowDetail, CatalogError>;
}
