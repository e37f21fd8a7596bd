//! Field normalization helpers
//!
//! Small pure functions that turn optional upstream fields into the concrete
//! values carried by [`Show`](super::Show), [`ShowDetail`](super::ShowDetail)
//! and [`Episode`](super::Episode).

/// Summary text used when upstream has none.
pub const SUMMARY_PLACEHOLDER: &str = "Not available!";

/// Poster URL used when upstream has no image.
pub const DEFAULT_IMAGE_URL: &str =
    "https://static.tvmaze.com/images/no-img/no-img-portrait-text.png";

/// Maximum number of characters of a search-result summary.
pub const SUMMARY_LIMIT: usize = 120;

/// Appended to a summary that was cut at [`SUMMARY_LIMIT`].
pub const TRUNCATION_SUFFIX: &str = " ...";

pub(super) fn summary_or_placeholder(summary: Option<String>) -> String {
    summary.unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string())
}

/// Cuts a summary down to [`SUMMARY_LIMIT`] characters plus the suffix.
///
/// Summaries of at most [`SUMMARY_LIMIT`] characters are returned untouched.
/// Counting is done in `char`s so multi-byte text is never split.
pub(super) fn truncate_summary(summary: String) -> String {
    match summary.char_indices().nth(SUMMARY_LIMIT) {
        Some((cut, _)) => format!("{}{}", &summary[..cut], TRUNCATION_SUFFIX),
        None => summary,
    }
}

/// Extracts the year from a `YYYY-MM-DD` premiere date, 0 if unknown.
pub(super) fn year_from_premiered(premiered: Option<&str>) -> u32 {
    premiered
        .and_then(|date| date.get(..4))
        .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|year| year.parse().ok())
        .unwrap_or(0)
}

pub(super) fn rating_or_zero(average: Option<f64>) -> f64 {
    average.filter(|rating| rating.is_finite()).unwrap_or(0.0)
}

/// Picks the first available image URL, falling back to [`DEFAULT_IMAGE_URL`].
pub(super) fn first_image_or_default<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string())
}
