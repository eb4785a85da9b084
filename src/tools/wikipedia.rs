use serde::{Deserialize, Serialize};

use super::docstore::{Docstore, MediaWikiClient, PageLookup};
use super::{Tool, ToolOutput};
use crate::schemas::parse_arguments;
use crate::Result;

/// Parameters for Wikipedia queries
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WikipediaParams {
    /// A search query as input to Wikipedia
    pub query: String,
}

/// Tool that queries Wikipedia for a page matching a free-text query.
///
/// An exact-title hit comes back as a [`Document`](super::Document) pairing
/// the page text with its canonical URL; anything else comes back as a plain
/// message listing similarly named titles.
#[derive(Debug)]
pub struct WikipediaTool {
    store: Box<dyn Docstore>,
}

impl Default for WikipediaTool {
    fn default() -> Self {
        Self::new(MediaWikiClient::new())
    }
}

impl WikipediaTool {
    /// Create the tool around an explicit doc store.
    pub fn new(store: impl Docstore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }
}

impl Tool for WikipediaTool {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn description(&self) -> &'static str {
        "Search engine from Wikipedia, retrieving relevant wiki pages. Useful when you need \
         holistic knowledge about people, places, companies, historical events, or other subjects."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": "A search query as input to Wikipedia"
                }
            },
            "required": ["query"]
        })
    }

    fn run(&self, arguments: serde_json::Value) -> Result<ToolOutput> {
        let params: WikipediaParams =
            parse_arguments(self.name(), &self.parameters_schema(), &arguments)?;

        match self.store.fetch(&params.query) {
            Ok(PageLookup::Page(document)) => Ok(ToolOutput::document(document)),
            Ok(PageLookup::Missing) | Ok(PageLookup::Ambiguous) => {
                let similar = match self.store.similar(&params.query) {
                    Ok(titles) => titles,
                    Err(failure) => return Ok(ToolOutput::text(failure.into_report())),
                };
                Ok(ToolOutput::text(format!(
                    "Could not find [{}]. Similar: {:?}",
                    params.query, similar
                )))
            }
            Err(failure) => Ok(ToolOutput::text(failure.into_report())),
        }
    }
}
