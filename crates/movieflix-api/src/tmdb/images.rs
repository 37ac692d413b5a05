//! Image CDN and web page URLs for movie records.

use super::types::Movie;

/// Base URL for poster images (w500).
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for backdrop images (w1280).
pub const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/w1280";

/// Base URL for public movie pages on themoviedb.org.
pub const TMDB_MOVIE_PAGE_URL: &str = "https://www.themoviedb.org/movie";

/// Joins a base URL with an API-supplied path fragment.
fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{base}{p}"))
}

impl Movie {
    /// Full poster URL, if the record has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        image_url(POSTER_BASE_URL, self.poster_path.as_deref())
    }

    /// Full backdrop URL, if the record has a backdrop.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        image_url(BACKDROP_BASE_URL, self.backdrop_path.as_deref())
    }

    /// Public themoviedb.org page for this record.
    #[must_use]
    pub fn page_url(&self) -> String {
        format!("{TMDB_MOVIE_PAGE_URL}/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_and_backdrop_urls() {
        // Arrange
        let movie = Movie {
            id: 438_631,
            poster_path: Some(String::from("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")),
            backdrop_path: Some(String::from("/jYEW5xZkZk2WTrdbMGAPFuBqbDc.jpg")),
            ..Movie::default()
        };

        // Act & Assert
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );
        assert_eq!(
            movie.backdrop_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/jYEW5xZkZk2WTrdbMGAPFuBqbDc.jpg")
        );
    }

    #[test]
    fn test_missing_or_empty_paths_have_no_url() {
        // Arrange
        let movie = Movie {
            id: 1,
            poster_path: None,
            backdrop_path: Some(String::new()),
            ..Movie::default()
        };

        // Act & Assert
        assert!(movie.poster_url().is_none());
        assert!(movie.backdrop_url().is_none());
    }

    #[test]
    fn test_page_url() {
        // Arrange
        let movie = Movie {
            id: 693_134,
            ..Movie::default()
        };

        // Act & Assert
        assert_eq!(movie.page_url(), "https://www.themoviedb.org/movie/693134");
    }
}
