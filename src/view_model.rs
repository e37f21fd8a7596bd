//! Presentation state for show search and episode browsing
//!
//! The view model owns everything a front end displays. Each lookup is
//! started with a `begin_*` call that hands out a token, and its result is
//! only applied if no newer lookup of the same kind has been started since.
//! Late responses to superseded requests are therefore dropped instead of
//! overwriting newer results.

use crate::catalog::{CatalogError, CatalogProvider, Episode, ErrorKind, Show, ShowDetail};
use tracing::debug;

/// Identifies one search request issued by [`ViewModel::begin_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

/// Identifies one episode request issued by [`ViewModel::begin_episodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpisodesToken(u64);

/// What the show list currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShowsView {
    /// Nothing searched yet
    #[default]
    Idle,
    /// Search results
    Loaded(Vec<Show>),
    /// The last search matched nothing
    NotFound,
    /// The last search failed with the given detail
    Failed(String),
}

/// What the episode panel currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EpisodesView {
    /// The panel is not shown
    #[default]
    Hidden,
    /// A show header and its episodes
    Loaded {
        show: ShowDetail,
        episodes: Vec<Episode>,
    },
    /// The show exists but has no episodes
    NoEpisodes { show: ShowDetail },
    /// Loading the show or its episodes failed
    Failed(String),
}

/// Sequence-guarded presentation state.
///
/// Callers that issue requests from several threads share the view model
/// behind a `Mutex` and hold the lock only for the `begin_*`/`finish_*`
/// calls, never across the network request itself.
#[derive(Debug, Default)]
pub struct ViewModel {
    shows: ShowsView,
    episodes: EpisodesView,
    last_search: u64,
    last_episodes: u64,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shows(&self) -> &ShowsView {
        &self.shows
    }

    pub fn episodes(&self) -> &EpisodesView {
        &self.episodes
    }

    /// Starts a new search, superseding any search still in flight.
    pub fn begin_search(&mut self) -> SearchToken {
        self.last_search += 1;
        SearchToken(self.last_search)
    }

    /// Applies a search result if `token` belongs to the latest search.
    ///
    /// Applying a result also hides the episode panel.
    ///
    /// # Returns
    ///
    /// `true` if the result was applied, `false` if it was stale and dropped
    pub fn finish_search(
        &mut self,
        token: SearchToken,
        result: Result<Vec<Show>, CatalogError>,
    ) -> bool {
        if token.0 != self.last_search {
            debug!(
                token = token.0,
                latest = self.last_search,
                "discarding stale search response"
            );
            return false;
        }

        self.shows = match result {
            Ok(shows) => ShowsView::Loaded(shows),
            Err(e) if e.kind() == ErrorKind::EmptyResult => ShowsView::NotFound,
            Err(e) => ShowsView::Failed(e.to_string()),
        };
        self.episodes = EpisodesView::Hidden;
        true
    }

    /// Starts loading a show's episodes, superseding any such load in flight.
    pub fn begin_episodes(&mut self) -> EpisodesToken {
        self.last_episodes += 1;
        EpisodesToken(self.last_episodes)
    }

    /// Applies a show header and episode list if `token` is the latest.
    ///
    /// A failed detail lookup takes precedence over the episode result,
    /// since there is no header to show the episodes under.
    pub fn finish_episodes(
        &mut self,
        token: EpisodesToken,
        detail: Result<ShowDetail, CatalogError>,
        episodes: Result<Vec<Episode>, CatalogError>,
    ) -> bool {
        if token.0 != self.last_episodes {
            debug!(
                token = token.0,
                latest = self.last_episodes,
                "discarding stale episodes response"
            );
            return false;
        }

        self.episodes = match (detail, episodes) {
            (Err(e), _) => EpisodesView::Failed(e.to_string()),
            (Ok(show), Ok(episodes)) => EpisodesView::Loaded { show, episodes },
            (Ok(show), Err(e)) if e.kind() == ErrorKind::EmptyResult => {
                EpisodesView::NoEpisodes { show }
            }
            (Ok(_), Err(e)) => EpisodesView::Failed(e.to_string()),
        };
        true
    }

    /// Runs a complete search against `provider` on the calling thread.
    pub fn search<P>(&mut self, provider: &P, term: &str) -> &ShowsView
    where
        P: CatalogProvider + ?Sized,
    {
        let token = self.begin_search();
        let result = provider.search_shows(term);
        self.finish_search(token, result);
        &self.shows
    }

    /// Loads the header and episodes of a show on the calling thread.
    ///
    /// The episode list is only requested once the detail lookup succeeded.
    pub fn open_show<P>(&mut self, provider: &P, show_id: u32) -> &EpisodesView
    where
        P: CatalogProvider + ?Sized,
    {
        let token = self.begin_episodes();
        let detail = provider.show_detail(show_id);
        let episodes = if detail.is_ok() {
            provider.list_episodes(show_id)
        } else {
            Ok(Vec::new())
        };
        self.finish_episodes(token, detail, episodes);
        &self.episodes
    }
}
