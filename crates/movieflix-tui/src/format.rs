//! Display formatting for movie records.

use chrono::NaiveDate;
use movieflix_api::tmdb::Movie;

/// Placeholder for a missing or unparsable date.
pub const UNKNOWN: &str = "Unknown";

/// Colour band of a rating badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// 8.0 and above.
    Excellent,
    /// 7.0 to 7.9.
    Good,
    /// 6.0 to 6.9.
    Fair,
    /// Below 6.0.
    Poor,
}

impl RatingTier {
    /// Tier for a 0-10 vote average.
    #[must_use]
    pub fn of(vote_average: f64) -> Self {
        if vote_average >= 8.0 {
            Self::Excellent
        } else if vote_average >= 7.0 {
            Self::Good
        } else if vote_average >= 6.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// TMDB movie genre names by id.
const GENRES: [(u32, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

fn parse_date(date: Option<&str>) -> Option<NaiveDate> {
    let date = date?.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Four-digit release year, or "Unknown".
#[must_use]
pub fn release_year(movie: &Movie) -> String {
    movie
        .release_date
        .as_deref()
        .map(str::trim)
        .and_then(|date| date.get(..4))
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
        .map_or_else(|| String::from(UNKNOWN), String::from)
}

/// Release date as "Month D, YYYY" (e.g. "March 1, 2024"), or "Unknown".
#[must_use]
pub fn format_release_date(movie: &Movie) -> String {
    parse_date(movie.release_date.as_deref()).map_or_else(
        || String::from(UNKNOWN),
        |date| date.format("%B %-d, %Y").to_string(),
    )
}

/// Rating to one decimal, hidden when the record has no votes.
#[must_use]
pub fn format_rating(movie: &Movie) -> Option<String> {
    (movie.vote_average > 0.0).then(|| format!("{:.1}", movie.vote_average))
}

/// Badge percentage: `round(vote_average * 10)` (8.26 -> 83).
#[must_use]
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rating_badge(vote_average: f64) -> u8 {
    (vote_average * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Genre names from the detail payload, falling back to `genre_ids`.
#[must_use]
pub fn genre_names(movie: &Movie) -> Vec<String> {
    if let Some(genres) = movie.genres.as_ref().filter(|g| !g.is_empty()) {
        return genres.iter().map(|g| g.name.clone()).collect();
    }
    movie
        .genre_ids
        .iter()
        .filter_map(|id| {
            GENRES
                .iter()
                .find(|(known, _)| known == id)
                .map(|(_, name)| String::from(*name))
        })
        .collect()
}

/// Truncates `text` to `width` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return String::from(text);
    }
    let keep = width.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use movieflix_api::tmdb::Genre;

    use super::*;

    fn dated(date: Option<&str>) -> Movie {
        Movie {
            id: 1,
            release_date: date.map(String::from),
            ..Movie::default()
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(&dated(Some("2024-02-27"))), "2024");
        assert_eq!(release_year(&dated(None)), "Unknown");
        assert_eq!(release_year(&dated(Some(""))), "Unknown");
        assert_eq!(release_year(&dated(Some("TBA"))), "Unknown");
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(
            format_release_date(&dated(Some("2024-03-01"))),
            "March 1, 2024"
        );
        assert_eq!(
            format_release_date(&dated(Some("1984-12-14"))),
            "December 14, 1984"
        );
        assert_eq!(format_release_date(&dated(None)), "Unknown");
        assert_eq!(format_release_date(&dated(Some("2024-13-45"))), "Unknown");
    }

    #[test]
    fn test_format_rating_hidden_when_zero() {
        // Arrange
        let rated = Movie {
            vote_average: 8.26,
            ..dated(None)
        };

        // Act & Assert
        assert_eq!(format_rating(&rated).as_deref(), Some("8.3"));
        assert_eq!(format_rating(&dated(None)), None);
    }

    #[test]
    fn test_rating_badge_rounds() {
        assert_eq!(rating_badge(8.26), 83);
        assert_eq!(rating_badge(7.04), 70);
        assert_eq!(rating_badge(0.0), 0);
        assert_eq!(rating_badge(10.0), 100);
    }

    #[test]
    fn test_rating_tier_boundaries() {
        assert_eq!(RatingTier::of(8.0), RatingTier::Excellent);
        assert_eq!(RatingTier::of(7.99), RatingTier::Good);
        assert_eq!(RatingTier::of(7.0), RatingTier::Good);
        assert_eq!(RatingTier::of(6.5), RatingTier::Fair);
        assert_eq!(RatingTier::of(5.9), RatingTier::Poor);
        assert_eq!(RatingTier::of(0.0), RatingTier::Poor);
    }

    #[test]
    fn test_genre_names_prefers_detail_genres() {
        // Arrange
        let movie = Movie {
            genre_ids: vec![28],
            genres: Some(vec![Genre {
                id: 878,
                name: String::from("Science Fiction"),
            }]),
            ..dated(None)
        };

        // Act & Assert
        assert_eq!(genre_names(&movie), vec![String::from("Science Fiction")]);
    }

    #[test]
    fn test_genre_names_from_ids_skips_unknown() {
        // Arrange
        let movie = Movie {
            genre_ids: vec![878, 12, 999_999],
            ..dated(None)
        };

        // Act & Assert
        assert_eq!(
            genre_names(&movie),
            vec![String::from("Science Fiction"), String::from("Adventure")]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("Dune: Part Two", 6), "Dune:\u{2026}");
        assert_eq!(truncate("", 0), "");
    }
}
