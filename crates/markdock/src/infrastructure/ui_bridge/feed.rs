//! Presentation-side view of the news body.
//!
//! The fetcher passes the Currents API response through untouched.  Hosts
//! that render it themselves (the headless binary) parse it here into
//! [`ArticleDto`]s.  Only the fields the dock displays are read; everything
//! else in the payload is ignored.
//!
//! ```json
//! { "status": "ok",
//!   "news": [ { "title": "...", "url": "...", "author": "...",
//!               "published": "2025-01-02 10:00:00 +0000",
//!               "description": "...", "category": ["business"] } ] }
//! ```

use serde::{Deserialize, Serialize};

/// One article as shown in the news panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDto {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
}

impl ArticleDto {
    /// Author, or `"Unknown"` when the feed has none.
    pub fn byline(&self) -> &str {
        match self.author.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => "Unknown",
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    news: Vec<ArticleDto>,
}

/// Parses the article list out of a news body.  A body without a `news`
/// array yields an empty list.
pub fn parse_articles(body: &str) -> Result<Vec<ArticleDto>, serde_json::Error> {
    serde_json::from_str::<FeedEnvelope>(body).map(|env| env.news)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_articles_reads_displayed_fields() {
        // Arrange
        let body = r#"{
            "status": "ok",
            "news": [
                {
                    "id": "abc",
                    "title": "Markets rally",
                    "url": "https://example.com/a",
                    "author": "Reuters",
                    "published": "2025-01-02 10:00:00 +0000",
                    "description": "Stocks rose.",
                    "category": ["business", "finance"],
                    "image": "None",
                    "language": "en"
                }
            ],
            "page": 1
        }"#;

        // Act
        let articles = parse_articles(body).expect("parse");

        // Assert
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Markets rally");
        assert_eq!(articles[0].byline(), "Reuters");
        assert_eq!(articles[0].category, vec!["business", "finance"]);
    }

    #[test]
    fn test_missing_news_array_is_empty() {
        assert!(parse_articles(r#"{"status":"ok"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_author_reads_unknown() {
        let articles = parse_articles(r#"{"news":[{"title":"t","author":""}]}"#).unwrap();
        assert_eq!(articles[0].byline(), "Unknown");
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        assert!(parse_articles("<html>rate limited</html>").is_err());
    }
}
