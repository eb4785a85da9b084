use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::tool::Document;
use crate::error::ServiceFailure;

const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
const SEARCH_LIMIT: &str = "10";

/// Outcome of an exact-title page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    /// The title resolved to a single page
    Page(Document),
    /// No page carries this title
    Missing,
    /// The title names a disambiguation page, not an article
    Ambiguous,
}

/// A knowledge base that can fetch pages by exact title and suggest
/// similarly named titles for a free-text query.
pub trait Docstore: Send + Sync + std::fmt::Debug {
    fn fetch(&self, title: &str) -> std::result::Result<PageLookup, ServiceFailure>;

    fn similar(&self, query: &str) -> std::result::Result<Vec<String>, ServiceFailure>;
}

#[derive(Debug, Deserialize)]
struct PageQueryResponse {
    query: PageQueryBody,
}

#[derive(Debug, Deserialize)]
struct PageQueryBody {
    #[serde(default)]
    pages: Vec<PageBody>,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    fullurl: Option<String>,
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQueryResponse {
    query: SearchQueryBody,
}

#[derive(Debug, Deserialize)]
struct SearchQueryBody {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

/// Blocking client for the MediaWiki action API
#[derive(Debug, Clone)]
pub struct MediaWikiClient {
    endpoint: String,
    http: Client,
}

impl Default for MediaWikiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaWikiClient {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different MediaWiki endpoint (used by tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn get(&self, query: &[(&str, &str)]) -> std::result::Result<String, ServiceFailure> {
        debug!("querying MediaWiki endpoint");
        let response = self
            .http
            .get(&self.endpoint)
            .query(query)
            .send()
            .map_err(|err| {
                ServiceFailure::new(
                    format!("encyclopedia request failed: {}", err),
                    "<no response>",
                )
            })?;

        response.text().map_err(|err| {
            ServiceFailure::new(
                format!("failed to read encyclopedia response: {}", err),
                "<no response>",
            )
        })
    }
}

impl Docstore for MediaWikiClient {
    fn fetch(&self, title: &str) -> std::result::Result<PageLookup, ServiceFailure> {
        let raw = self.get(&[
            ("action", "query"),
            ("prop", "extracts|info|pageprops"),
            ("ppprop", "disambiguation"),
            ("inprop", "url"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("format", "json"),
            ("formatversion", "2"),
            ("titles", title),
        ])?;

        let parsed: PageQueryResponse = decode(&raw)?;
        let Some(page) = parsed.query.pages.into_iter().next() else {
            return Ok(PageLookup::Missing);
        };

        if page.missing || page.invalid {
            return Ok(PageLookup::Missing);
        }
        if page
            .pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
        {
            return Ok(PageLookup::Ambiguous);
        }

        match (page.extract, page.fullurl) {
            (Some(extract), Some(fullurl)) => Ok(PageLookup::Page(Document::new(extract, fullurl))),
            _ => Err(ServiceFailure::new(
                "page payload is missing its extract or URL".to_string(),
                raw,
            )),
        }
    }

    fn similar(&self, query: &str) -> std::result::Result<Vec<String>, ServiceFailure> {
        let raw = self.get(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", SEARCH_LIMIT),
            ("format", "json"),
            ("formatversion", "2"),
        ])?;

        let parsed: SearchQueryResponse = decode(&raw)?;
        Ok(parsed
            .query
            .search
            .into_iter()
            .map(|hit| hit.title)
            .collect())
    }
}

fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> std::result::Result<T, ServiceFailure> {
    let mut deserializer = serde_json::Deserializer::from_str(raw.trim());
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() {
            "<root>".to_string()
        } else {
            path
        };
        ServiceFailure::new(
            format!("unexpected encyclopedia payload at {}: {}", location, err),
            raw,
        )
    })
}
