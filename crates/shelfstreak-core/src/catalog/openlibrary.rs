//! Open Library search client.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::BookLookup;
use crate::error::LookupError;
use crate::library::BookMetadata;
use crate::storage::CatalogConfig;

const SERVICE: &str = "Open Library";
const MAX_GENRES: usize = 3;

/// Looks books up through `GET {base_url}/search.json?q=...`.
#[derive(Clone)]
pub struct OpenLibraryClient {
    http: reqwest::Client,
    search_url: Url,
    covers_url: String,
    placeholder_cover: String,
}

impl OpenLibraryClient {
    /// # Errors
    /// Returns [`LookupError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(config: &CatalogConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| LookupError::Transport {
                service: SERVICE,
                source,
            })?;
        // Keep any path prefix: `join` replaces the last segment unless the
        // base ends in a slash.
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let search_url = Url::parse(&base)?.join("search.json")?;
        Ok(Self {
            http,
            search_url,
            covers_url: config.covers_url.trim_end_matches('/').to_string(),
            placeholder_cover: config.placeholder_cover.clone(),
        })
    }

    fn to_metadata(&self, query: &str, doc: SearchDoc) -> BookMetadata {
        let cover_url = match doc.cover_i {
            Some(id) => format!("{}/b/id/{id}-L.jpg", self.covers_url),
            None => self.placeholder_cover.clone(),
        };
        let genre = [&doc.subject, &doc.subject_key, &doc.subject_facet]
            .into_iter()
            .find(|subjects| !subjects.is_empty())
            .map(|subjects| {
                subjects
                    .iter()
                    .take(MAX_GENRES)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "Unknown Genre".to_string());
        let author = doc
            .author_name
            .filter(|names| !names.is_empty())
            .map(|names| names.join(", "))
            .unwrap_or_else(|| "Unknown Author".to_string());
        let description = match doc.first_sentence {
            Some(FirstSentence::Many(lines)) if !lines.is_empty() => lines.join(" "),
            Some(FirstSentence::One(line)) if !line.is_empty() => line,
            _ => "No description available.".to_string(),
        };

        BookMetadata {
            title: doc.title.unwrap_or_else(|| query.to_string()),
            author,
            description,
            genre,
            cover_url,
        }
    }
}

#[async_trait]
impl BookLookup for OpenLibraryClient {
    async fn lookup(&self, query: &str) -> Result<Option<BookMetadata>, LookupError> {
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|source| LookupError::Transport {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| LookupError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;

        let found = body.docs.into_iter().next();
        tracing::debug!(query, found = found.is_some(), "catalog lookup");
        Ok(found.map(|doc| self.to_metadata(query, doc)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_sentence: Option<FirstSentence>,
    cover_i: Option<i64>,
    #[serde(default)]
    subject: Vec<String>,
    #[serde(default)]
    subject_key: Vec<String>,
    #[serde(default)]
    subject_facet: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FirstSentence {
    Many(Vec<String>),
    One(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(base_url: &str) -> OpenLibraryClient {
        OpenLibraryClient::new(&CatalogConfig {
            base_url: base_url.to_string(),
            covers_url: "https://covers.example".to_string(),
            placeholder_cover: "https://placeholder.example/150".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn search_url_keeps_base_path() {
        assert_eq!(
            client("https://proxy.example/openlibrary").search_url.as_str(),
            "https://proxy.example/openlibrary/search.json"
        );
        assert_eq!(
            client("https://openlibrary.org/").search_url.as_str(),
            "https://openlibrary.org/search.json"
        );
    }

    #[tokio::test]
    async fn first_doc_is_mapped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search.json")
            .match_query(Matcher::UrlEncoded("q".into(), "the hobbit".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"docs":[
                    {"title":"The Hobbit","author_name":["J.R.R. Tolkien"],
                     "first_sentence":["In a hole in the ground","there lived a hobbit."],
                     "cover_i":42,
                     "subject":["Fantasy","Dragons","Wizards","Quests"]},
                    {"title":"Other"}
                ]}"#,
            )
            .create_async()
            .await;

        let book = client(&server.url()).lookup("the hobbit").await.unwrap().unwrap();
        mock.assert_async().await;

        assert_eq!(book.title, "The Hobbit");
        assert_eq!(book.author, "J.R.R. Tolkien");
        assert_eq!(book.description, "In a hole in the ground there lived a hobbit.");
        assert_eq!(book.genre, "Fantasy, Dragons, Wizards");
        assert_eq!(book.cover_url, "https://covers.example/b/id/42-L.jpg");
    }

    #[tokio::test]
    async fn missing_fields_fall_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"docs":[{"subject_facet":["Poetry"]}]}"#)
            .create_async()
            .await;

        let book = client(&server.url()).lookup("odes").await.unwrap().unwrap();
        assert_eq!(book.title, "odes");
        assert_eq!(book.author, "Unknown Author");
        assert_eq!(book.description, "No description available.");
        assert_eq!(book.genre, "Poetry");
        assert_eq!(book.cover_url, "https://placeholder.example/150");
    }

    #[tokio::test]
    async fn no_subjects_is_unknown_genre() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"docs":[{"title":"Plain","first_sentence":"Just one."}]}"#)
            .create_async()
            .await;

        let book = client(&server.url()).lookup("plain").await.unwrap().unwrap();
        assert_eq!(book.genre, "Unknown Genre");
        assert_eq!(book.description, "Just one.");
    }

    #[tokio::test]
    async fn empty_docs_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"numFound":0,"docs":[]}"#)
            .create_async()
            .await;

        assert!(client(&server.url()).lookup("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client(&server.url()).lookup("x").await.unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server.url()).lookup("x").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode { .. }));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = OpenLibraryClient::new(&CatalogConfig {
            base_url: "not a url".into(),
            ..CatalogConfig::default()
        });
        assert!(matches!(err, Err(LookupError::InvalidUrl(_))));
    }
}
