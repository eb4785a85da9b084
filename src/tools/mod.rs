//! Tools module containing the tool contract and the built-in adapters

pub mod docstore;
pub mod tool;
pub mod weather;
pub mod wikipedia;

pub use docstore::{Docstore, MediaWikiClient, PageLookup};
pub use tool::{Document, Tool, ToolOutput, ToolRegistry};
pub use weather::{CurrentWeatherTool, WeatherForecastTool, MAX_FORECAST_DAYS};
pub use wikipedia::WikipediaTool;
