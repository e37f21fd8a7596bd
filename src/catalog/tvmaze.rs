/// TVMaze catalog provider implementation.
use super::normalize::{
    first_image_or_default, rating_or_zero, summary_or_placeholder, truncate_summary,
    year_from_premiered,
};
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchMatch, TvMazeShow};
use super::{CatalogError, CatalogProvider, Episode, Show, ShowDetail};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Base URL of the public TVMaze API.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Catalog provider for the TVMaze API.
///
/// This provider fetches show and episode information from
/// https://api.tvmaze.com using the search, show and episode list endpoints.
pub struct TvMazeProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeProvider {
    /// Creates a new TVMaze provider instance.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a provider talking to a different host, e.g. a local mirror.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a prepared request and decodes its JSON body.
    ///
    /// Transport failures and non-success statuses map to
    /// [`CatalogError::Request`], undecodable bodies to [`CatalogError::Parse`].
    fn fetch_json<T>(&self, request: reqwest::blocking::RequestBuilder) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %response.url(), status = status.as_u16(), "catalog request failed");
            return Err(CatalogError::Request(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Converts a TVMaze show to a search-result [`Show`].
    fn convert_show(tvmaze_show: TvMazeShow) -> Show {
        let medium = tvmaze_show.image.and_then(|image| image.medium);
        Show {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            genres: tvmaze_show.genres.unwrap_or_default(),
            rating: rating_or_zero(tvmaze_show.rating.and_then(|r| r.average)),
            year: year_from_premiered(tvmaze_show.premiered.as_deref()),
            summary: truncate_summary(summary_or_placeholder(tvmaze_show.summary)),
            image: first_image_or_default([medium]),
        }
    }

    /// Converts a TVMaze show to a [`ShowDetail`], keeping the full summary
    /// and preferring the original size image.
    fn convert_detail(tvmaze_show: TvMazeShow) -> ShowDetail {
        let (original, medium) = match tvmaze_show.image {
            Some(image) => (image.original, image.medium),
            None => (None, None),
        };
        ShowDetail {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            genres: tvmaze_show.genres.unwrap_or_default(),
            rating: rating_or_zero(tvmaze_show.rating.and_then(|r| r.average)),
            year: year_from_premiered(tvmaze_show.premiered.as_deref()),
            summary: summary_or_placeholder(tvmaze_show.summary),
            image: first_image_or_default([original, medium]),
        }
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: tvmaze_episode.id,
            name: tvmaze_episode
                .name
                .unwrap_or_else(|| "Unknown".to_string()),
            season: tvmaze_episode.season,
            number: tvmaze_episode.number.unwrap_or(0),
            summary: summary_or_placeholder(tvmaze_episode.summary),
            image: first_image_or_default([tvmaze_episode.image.and_then(|image| image.medium)]),
        }
    }

    fn shows_from_matches(
        matches: Vec<TvMazeSearchMatch>,
        term: &str,
    ) -> Result<Vec<Show>, CatalogError> {
        if matches.is_empty() {
            return Err(CatalogError::NoShowsFound(term.to_string()));
        }

        Ok(matches
            .into_iter()
            .map(|m| Self::convert_show(m.show))
            .collect())
    }

    fn episodes_from_list(
        episodes: Vec<TvMazeEpisode>,
        show_id: u32,
    ) -> Result<Vec<Episode>, CatalogError> {
        if episodes.is_empty() {
            return Err(CatalogError::NoEpisodesFound(show_id));
        }

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}

impl Default for TvMazeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for TvMazeProvider {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError> {
        let url = format!("{}/search/shows", self.base_url);
        debug!(%url, term, "searching shows");

        let matches: Vec<TvMazeSearchMatch> =
            self.fetch_json(self.client.get(&url).query(&[("q", term)]))?;
        debug!(count = matches.len(), "received search matches");

        Self::shows_from_matches(matches, term)
    }

    fn list_episodes(&self, show_id: u32) -> Result<Vec<Episode>, CatalogError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        debug!(%url, show_id, "listing episodes");

        let episodes: Vec<TvMazeEpisode> = self.fetch_json(self.client.get(&url))?;
        debug!(count = episodes.len(), "received episodes");

        Self::episodes_from_list(episodes, show_id)
    }

    fn show_detail(&self, show_id: u32) -> Result<ShowDetail, CatalogError> {
        let url = format!("{}/shows/{}", self.base_url, show_id);
        debug!(%url, show_id, "fetching show detail");

        let show: TvMazeShow = self.fetch_json(self.client.get(&url))?;
        Ok(Self::convert_detail(show))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_IMAGE_URL, ErrorKind, SUMMARY_PLACEHOLDER};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    const SEARCH_BODY: &str = r#"[
        {
            "score": 0.9,
            "show": {
                "id": 1,
                "name": "Under the Dome",
                "genres": ["Drama", "Science-Fiction", "Thriller"],
                "rating": {"average": 6.5},
                "premiered": "2013-06-24",
                "summary": "<p><b>Under the Dome</b> is the story of a small town that is suddenly and inexplicably sealed off from the rest of the world by an enormous transparent dome.</p>",
                "image": {
                    "medium": "https://static.tvmaze.com/uploads/images/medium_portrait/81/202627.jpg",
                    "original": "https://static.tvmaze.com/uploads/images/original_untouched/81/202627.jpg"
                }
            }
        },
        {
            "score": 0.5,
            "show": {
                "id": 2,
                "name": "Obscure Pilot",
                "genres": [],
                "rating": {"average": null},
                "premiered": null,
                "summary": null,
                "image": null
            }
        }
    ]"#;

    const EPISODES_BODY: &str = r#"[
        {
            "id": 10,
            "name": "Pilot",
            "season": 1,
            "number": 1,
            "summary": "<p>When the residents of Chester's Mill find themselves trapped under a massive transparent dome with no way out, they struggle to survive as resources rapidly dwindle and panic quickly escalates.</p>",
            "image": {"medium": "https://static.tvmaze.com/uploads/images/medium_landscape/1/4388.jpg"}
        },
        {
            "id": 11,
            "name": null,
            "season": 1,
            "number": null,
            "summary": null,
            "image": null
        }
    ]"#;

    const DETAIL_BODY: &str = r#"{
        "id": 1,
        "name": "Under the Dome",
        "genres": ["Drama"],
        "rating": {"average": 6.5},
        "premiered": "2013-06-24",
        "summary": "<p><b>Under the Dome</b> is the story of a small town that is suddenly and inexplicably sealed off from the rest of the world by an enormous transparent dome.</p>",
        "image": {
            "medium": "https://static.tvmaze.com/uploads/images/medium_portrait/81/202627.jpg",
            "original": "https://static.tvmaze.com/uploads/images/original_untouched/81/202627.jpg"
        }
    }"#;

    /// Serves exactly one canned HTTP response on a loopback port.
    ///
    /// Returns the base URL and a receiver yielding the request line.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request = String::from_utf8_lossy(&request);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (base_url, rx)
    }

    #[test]
    fn test_convert_search_matches() {
        let matches: Vec<TvMazeSearchMatch> = serde_json::from_str(SEARCH_BODY).unwrap();
        let shows = TvMazeProvider::shows_from_matches(matches, "dome").unwrap();

        assert_eq!(shows.len(), 2);

        let dome = &shows[0];
        assert_eq!(dome.id, 1);
        assert_eq!(dome.name, "Under the Dome");
        assert_eq!(dome.genres, vec!["Drama", "Science-Fiction", "Thriller"]);
        assert_eq!(dome.rating, 6.5);
        assert_eq!(dome.year, 2013);
        assert!(dome.summary.ends_with(" ..."));
        assert_eq!(dome.summary.chars().count(), 124);
        assert!(dome.image.contains("medium_portrait"));

        let obscure = &shows[1];
        assert!(obscure.genres.is_empty());
        assert_eq!(obscure.rating, 0.0);
        assert_eq!(obscure.year, 0);
        assert_eq!(obscure.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(obscure.image, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_convert_show_missing_optional_fields() {
        let show: TvMazeShow = serde_json::from_str(r#"{"id": 7, "name": "Bare"}"#).unwrap();
        let show = TvMazeProvider::convert_show(show);

        assert_eq!(show.genres, Vec::<String>::new());
        assert_eq!(show.rating, 0.0);
        assert_eq!(show.year, 0);
        assert_eq!(show.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(show.image, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_empty_search_is_empty_result() {
        let err = TvMazeProvider::shows_from_matches(Vec::new(), "xyzzy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
        assert!(matches!(err, CatalogError::NoShowsFound(term) if term == "xyzzy"));
    }

    #[test]
    fn test_convert_episodes_never_truncates() {
        let episodes: Vec<TvMazeEpisode> = serde_json::from_str(EPISODES_BODY).unwrap();
        let episodes = TvMazeProvider::episodes_from_list(episodes, 1).unwrap();

        assert_eq!(episodes.len(), 2);

        let pilot = &episodes[0];
        assert_eq!(pilot.id, 10);
        assert_eq!(pilot.season, 1);
        assert_eq!(pilot.number, 1);
        assert!(pilot.summary.chars().count() > 120);
        assert!(pilot.summary.ends_with("escalates.</p>"));

        let special = &episodes[1];
        assert_eq!(special.name, "Unknown");
        assert_eq!(special.number, 0);
        assert_eq!(special.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(special.image, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_empty_episode_list_is_empty_result() {
        let err = TvMazeProvider::episodes_from_list(Vec::new(), 42).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
        assert!(matches!(err, CatalogError::NoEpisodesFound(42)));
    }

    #[test]
    fn test_convert_detail_prefers_original_image() {
        let show: TvMazeShow = serde_json::from_str(DETAIL_BODY).unwrap();
        let detail = TvMazeProvider::convert_detail(show);

        assert!(detail.image.contains("original_untouched"));
        assert!(detail.summary.ends_with("dome.</p>"));
        assert_eq!(detail.year, 2013);
    }

    #[test]
    fn test_convert_detail_falls_back_to_medium_image() {
        let show: TvMazeShow = serde_json::from_str(
            r#"{"id": 3, "name": "Medium Only", "image": {"medium": "m.jpg", "original": null}}"#,
        )
        .unwrap();
        assert_eq!(TvMazeProvider::convert_detail(show).image, "m.jpg");
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let first: Vec<TvMazeSearchMatch> = serde_json::from_str(SEARCH_BODY).unwrap();
        let second: Vec<TvMazeSearchMatch> = serde_json::from_str(SEARCH_BODY).unwrap();
        assert_eq!(
            TvMazeProvider::shows_from_matches(first, "A").unwrap(),
            TvMazeProvider::shows_from_matches(second, "A").unwrap()
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = TvMazeProvider::with_base_url("http://localhost:8080/");
        assert_eq!(provider.base_url(), "http://localhost:8080");
        assert_eq!(TvMazeProvider::new().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_search_shows_over_http() {
        let (base_url, requests) = serve_once("200 OK", SEARCH_BODY);
        let provider = TvMazeProvider::with_base_url(base_url);

        let shows = provider.search_shows("under the dome").unwrap();
        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].name, "Under the Dome");

        let request_line = requests.recv().unwrap();
        assert!(request_line.starts_with("GET /search/shows?q=under"));
        assert!(!request_line.contains("under the dome"));
    }

    #[test]
    fn test_search_shows_empty_over_http() {
        let (base_url, _requests) = serve_once("200 OK", "[]");
        let provider = TvMazeProvider::with_base_url(base_url);

        let err = provider.search_shows("xyzzy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[test]
    fn test_list_episodes_over_http() {
        let (base_url, requests) = serve_once("200 OK", EPISODES_BODY);
        let provider = TvMazeProvider::with_base_url(base_url);

        let episodes = provider.list_episodes(1).unwrap();
        assert_eq!(episodes.len(), 2);
        assert!(requests.recv().unwrap().starts_with("GET /shows/1/episodes "));
    }

    #[test]
    fn test_show_detail_over_http() {
        let (base_url, requests) = serve_once("200 OK", DETAIL_BODY);
        let provider = TvMazeProvider::with_base_url(base_url);

        let detail = provider.show_detail(1).unwrap();
        assert_eq!(detail.name, "Under the Dome");
        assert!(requests.recv().unwrap().starts_with("GET /shows/1 "));
    }

    #[test]
    fn test_non_success_status_is_network_error() {
        let (base_url, _requests) = serve_once("404 Not Found", r#"{"name":"Not Found"}"#);
        let provider = TvMazeProvider::with_base_url(base_url);

        let err = provider.show_detail(999_999).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), "Request failed: HTTP 404 Not Found");
    }

    #[test]
    fn test_malformed_body_is_network_error() {
        let (base_url, _requests) = serve_once("200 OK", r#"{"unexpected": true}"#);
        let provider = TvMazeProvider::with_base_url(base_url);

        let err = provider.list_episodes(1).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let provider = TvMazeProvider::with_base_url(base_url);
        let err = provider.search_shows("A").unwrap_err();
        assert!(matches!(err, CatalogError::Request(_)));
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
