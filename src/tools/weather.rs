use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Tool, ToolOutput};
use crate::error::ServiceFailure;
use crate::schemas::parse_arguments;
use crate::Result;

const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
const CURRENT_PATH: &str = "/current.json";
const FORECAST_PATH: &str = "/forecast.json";

/// Longest forecast horizon the provider plan supports.
pub const MAX_FORECAST_DAYS: u32 = 3;

/// A requested day offset past the horizon is clamped, not rejected.
pub(crate) fn effective_forecast_day(requested: u32) -> u32 {
    requested.min(MAX_FORECAST_DAYS)
}

/// Parameters for current-conditions queries
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CurrentWeatherParams {
    /// The location to be queried, e.g. San Francisco
    pub location: String,
}

/// Parameters for forecast queries
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WeatherForecastParams {
    /// The location to be queried, e.g. San Francisco
    pub location: String,
    /// How many days ahead, e.g. 2
    pub days: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeather {
    location: Location,
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
    region: String,
    country: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    condition: Condition,
    temp_c: f64,
    temp_f: f64,
    precip_mm: f64,
    precip_in: f64,
    pressure_mb: f64,
    humidity: f64,
    cloud: f64,
    feelslike_c: f64,
    feelslike_f: f64,
    gust_kph: f64,
    gust_mph: f64,
    vis_km: f64,
    vis_miles: f64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastWeather {
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    forecastday: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEntry {
    day: DayStats,
    astro: Astro,
}

#[derive(Debug, Deserialize)]
struct DayStats {
    condition: Condition,
    maxtemp_c: f64,
    maxtemp_f: f64,
    mintemp_c: f64,
    mintemp_f: f64,
    avgtemp_c: f64,
    avgtemp_f: f64,
    maxwind_kph: f64,
    maxwind_mph: f64,
    totalprecip_mm: f64,
    totalprecip_in: f64,
    totalsnow_cm: f64,
    daily_will_it_rain: i64,
    daily_chance_of_rain: i64,
    daily_will_it_snow: i64,
    daily_chance_of_snow: i64,
    avgvis_km: f64,
    avgvis_miles: f64,
    avghumidity: f64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct Astro {
    sunrise: String,
    sunset: String,
    moonrise: String,
    moonset: String,
}

/// Blocking client for the weather provider's HTTP API
#[derive(Debug, Clone)]
pub(crate) struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Build the client using the `WEATHER_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("WEATHER_API_KEY").map_err(|_| {
            crate::ToolError::Config("Missing WEATHER_API_KEY env var".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn fetch(&self, path: &str, query: &[(&str, &str)]) -> std::result::Result<String, ServiceFailure> {
        let url = format!("{}{}", self.base_url, path);
        debug!("requesting {} with {} query params", path, query.len());

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .map_err(|err| {
                ServiceFailure::new(format!("weather request failed: {}", err), "<no response>")
            })?;

        response.text().map_err(|err| {
            ServiceFailure::new(
                format!("failed to read weather response: {}", err),
                "<no response>",
            )
        })
    }

    fn current(&self, location: &str) -> std::result::Result<CurrentWeather, ServiceFailure> {
        let raw = self.fetch(CURRENT_PATH, &[("q", location)])?;
        decode(&raw)
    }

    /// Fetch the forecast and select the stats for `day` (1-based).
    fn forecast_day(
        &self,
        location: &str,
        day: u32,
    ) -> std::result::Result<ForecastEntry, ServiceFailure> {
        let days = day.to_string();
        let raw = self.fetch(FORECAST_PATH, &[("q", location), ("days", &days)])?;
        let parsed: ForecastWeather = decode(&raw)?;

        parsed
            .forecast
            .forecastday
            .into_iter()
            .nth(day as usize - 1)
            .ok_or_else(|| {
                ServiceFailure::new(
                    format!("forecast day {} missing from response", day),
                    raw,
                )
            })
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
            format!("unexpected weather payload at {}: {}", location, err),
            raw,
        )
    })
}

fn render_current(data: &CurrentWeather) -> String {
    let loc = &data.location;
    let cur = &data.current;

    let fields: [(&str, String); 14] = [
        ("overall", cur.condition.text.clone()),
        ("location", loc.name.clone()),
        ("region", loc.region.clone()),
        ("country", loc.country.clone()),
        ("local time", loc.localtime.clone()),
        (
            "temperature",
            format!("{}(C), {}(F)", cur.temp_c, cur.temp_f),
        ),
        (
            "precipitation",
            format!("{}(mm), {}(inch)", cur.precip_mm, cur.precip_in),
        ),
        ("pressure", format!("{}(millibar)", cur.pressure_mb)),
        ("humidity", cur.humidity.to_string()),
        ("cloud cover", cur.cloud.to_string()),
        (
            "feels like",
            format!("{}(C), {}(F)", cur.feelslike_c, cur.feelslike_f),
        ),
        (
            "wind gust",
            format!("{}(kph), {}(mph)", cur.gust_kph, cur.gust_mph),
        ),
        (
            "visibility",
            format!("{}(km), {}(miles)", cur.vis_km, cur.vis_miles),
        ),
        ("UV index", cur.uv.to_string()),
    ];

    let mut report = format!("Today's weather report for {}:\n", loc.name);
    for (key, value) in fields {
        report.push_str(&format!("{}: {}\n", key, value));
    }
    report
}

fn render_forecast(location: &str, day: u32, entry: &ForecastEntry) -> String {
    let stats = &entry.day;
    let astro = &entry.astro;

    let fields: [(&str, String); 18] = [
        ("overall", stats.condition.text.clone()),
        (
            "max temperature",
            format!("{}(C), {}(F)", stats.maxtemp_c, stats.maxtemp_f),
        ),
        (
            "min temperature",
            format!("{}(C), {}(F)", stats.mintemp_c, stats.mintemp_f),
        ),
        (
            "average temperature",
            format!("{}(C), {}(F)", stats.avgtemp_c, stats.avgtemp_f),
        ),
        (
            "max wind speed",
            format!("{}(kph), {}(mph)", stats.maxwind_kph, stats.maxwind_mph),
        ),
        (
            "total precipitation",
            format!("{}(mm), {}(inch)", stats.totalprecip_mm, stats.totalprecip_in),
        ),
        ("will it rain", stats.daily_will_it_rain.to_string()),
        ("chance of rain", stats.daily_chance_of_rain.to_string()),
        ("total snow", format!("{}(cm)", stats.totalsnow_cm)),
        ("will it snow", stats.daily_will_it_snow.to_string()),
        ("chance of snow", stats.daily_chance_of_snow.to_string()),
        (
            "average visibility",
            format!("{}(km), {}(miles)", stats.avgvis_km, stats.avgvis_miles),
        ),
        ("average humidity", stats.avghumidity.to_string()),
        ("UV index", stats.uv.to_string()),
        ("sunrise", astro.sunrise.clone()),
        ("sunset", astro.sunset.clone()),
        ("moonrise", astro.moonrise.clone()),
        ("moonset", astro.moonset.clone()),
    ];

    let mut report = format!("The weather forecast for {} in {} day(s):\n", location, day);
    for (key, value) in fields {
        report.push_str(&format!("{}: {}\n", key, value));
    }
    report
}

/// Tool that looks up the current weather conditions for a location
#[derive(Debug, Clone)]
pub struct CurrentWeatherTool {
    client: WeatherClient,
}

impl CurrentWeatherTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: WeatherClient::new(api_key),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: WeatherClient::from_env()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(base_url);
        self
    }
}

impl Tool for CurrentWeatherTool {
    fn name(&self) -> &'static str {
        "current_weather"
    }

    fn description(&self) -> &'static str {
        "Look up the current weather information for a given location. Input should be a location."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "minLength": 1,
                    "description": "The location to be queried, e.g. San Francisco"
                }
            },
            "required": ["location"]
        })
    }

    fn run(&self, arguments: serde_json::Value) -> Result<ToolOutput> {
        let params: CurrentWeatherParams =
            parse_arguments(self.name(), &self.parameters_schema(), &arguments)?;

        let output = match self.client.current(&params.location) {
            Ok(data) => render_current(&data),
            Err(failure) => failure.into_report(),
        };
        Ok(ToolOutput::text(output))
    }
}

/// Tool that looks up the weather forecast for the upcoming days
#[derive(Debug, Clone)]
pub struct WeatherForecastTool {
    client: WeatherClient,
}

impl WeatherForecastTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: WeatherClient::new(api_key),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: WeatherClient::from_env()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(base_url);
        self
    }
}

impl Tool for WeatherForecastTool {
    fn name(&self) -> &'static str {
        "weather_forecast"
    }

    fn description(&self) -> &'static str {
        "Look up the overall weather information in the upcoming days for a given location."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "minLength": 1,
                    "description": "The location to be queried, e.g. San Francisco"
                },
                "days": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "How many days ahead, at most 3, e.g. 2"
                }
            },
            "required": ["location", "days"]
        })
    }

    fn run(&self, arguments: serde_json::Value) -> Result<ToolOutput> {
        let params: WeatherForecastParams =
            parse_arguments(self.name(), &self.parameters_schema(), &arguments)?;

        // Offsets past the horizon are clamped rather than rejected.
        let day = effective_forecast_day(params.days);

        let output = match self.client.forecast_day(&params.location, day) {
            Ok(entry) => render_forecast(&params.location, day, &entry),
            Err(failure) => failure.into_report(),
        };
        Ok(ToolOutput::text(output))
    }
}
