use mockito::Matcher;
use serde_json::json;
use agent_tools_rs::{
    tools::{CurrentWeatherTool, WeatherForecastTool},
    Tool, ToolError,
};

fn current_body() -> serde_json::Value {
    json!({
        "location": {
            "name": "San Francisco",
            "region": "California",
            "country": "United States of America",
            "lat": 37.78,
            "lon": -122.42,
            "localtime": "2024-05-01 12:30"
        },
        "current": {
            "condition": {"text": "Partly cloudy", "code": 1003},
            "temp_c": 16.0,
            "temp_f": 60.8,
            "precip_mm": 0.1,
            "precip_in": 0.0,
            "pressure_mb": 1016.0,
            "humidity": 71,
            "cloud": 50,
            "feelslike_c": 16.0,
            "feelslike_f": 60.8,
            "gust_kph": 24.1,
            "gust_mph": 15.0,
            "vis_km": 16.0,
            "vis_miles": 9.0,
            "uv": 4.0
        }
    })
}

fn forecast_entry(condition: &str) -> serde_json::Value {
    json!({
        "day": {
            "condition": {"text": condition, "code": 1000},
            "maxtemp_c": 18.3, "maxtemp_f": 64.9,
            "mintemp_c": 11.1, "mintemp_f": 52.0,
            "avgtemp_c": 14.4, "avgtemp_f": 57.9,
            "maxwind_kph": 25.9, "maxwind_mph": 16.1,
            "totalprecip_mm": 0.4, "totalprecip_in": 0.02,
            "totalsnow_cm": 0.0,
            "daily_will_it_rain": 1,
            "daily_chance_of_rain": 83,
            "daily_will_it_snow": 0,
            "daily_chance_of_snow": 0,
            "avgvis_km": 9.8, "avgvis_miles": 6.0,
            "avghumidity": 77,
            "uv": 3.0
        },
        "astro": {
            "sunrise": "06:14 AM",
            "sunset": "08:01 PM",
            "moonrise": "03:28 AM",
            "moonset": "01:40 PM"
        }
    })
}

fn forecast_body() -> serde_json::Value {
    json!({
        "forecast": {
            "forecastday": [
                forecast_entry("Sunny"),
                forecast_entry("Cloudy"),
                forecast_entry("Sleet")
            ]
        }
    })
}

#[test]
fn current_weather_report_has_fourteen_ordered_fields() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/current.json")
        .match_query(Matcher::UrlEncoded("q".into(), "San Francisco".into()))
        .with_status(200)
        .with_body(current_body().to_string())
        .create();

    let tool = CurrentWeatherTool::new("test-key").with_base_url(server.url());
    let output = tool.run(json!({"location": "San Francisco"})).unwrap();
    let report = output.content();

    mock.assert();

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Today's weather report for San Francisco:");
    assert_eq!(lines.len(), 15);
    assert!(report.ends_with('\n'));

    let expected_keys = [
        "overall",
        "location",
        "region",
        "country",
        "local time",
        "temperature",
        "precipitation",
        "pressure",
        "humidity",
        "cloud cover",
        "feels like",
        "wind gust",
        "visibility",
        "UV index",
    ];
    for (line, key) in lines[1..].iter().zip(expected_keys) {
        assert!(
            line.starts_with(&format!("{}: ", key)),
            "expected `{}` to start with `{}:`",
            line,
            key
        );
    }

    assert!(report.contains("temperature: 16(C), 60.8(F)"));
    assert!(report.contains("pressure: 1016(millibar)"));
}

#[test]
fn forecast_day_offset_past_the_horizon_is_clamped() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/forecast.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Oslo".into()),
            Matcher::UrlEncoded("days".into(), "3".into()),
        ]))
        .with_status(200)
        .with_body(forecast_body().to_string())
        .create();

    let tool = WeatherForecastTool::new("test-key").with_base_url(server.url());
    let output = tool.run(json!({"location": "Oslo", "days": 5})).unwrap();
    let report = output.content();

    // A request for day 5 is served as day 3, using the last entry.
    mock.assert();
    assert!(report.starts_with("The weather forecast for Oslo in 3 day(s):"));
    assert!(report.contains("overall: Sleet"));
}

#[test]
fn forecast_day_offset_within_the_horizon_is_used_as_is() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/forecast.json")
        .match_query(Matcher::UrlEncoded("days".into(), "2".into()))
        .with_status(200)
        .with_body(forecast_body().to_string())
        .create();

    let tool = WeatherForecastTool::new("test-key").with_base_url(server.url());
    let output = tool.run(json!({"location": "Oslo", "days": 2})).unwrap();
    let report = output.content();

    assert!(report.starts_with("The weather forecast for Oslo in 2 day(s):"));
    assert!(report.contains("overall: Cloudy"));
    assert!(report.contains("sunrise: 06:14 AM"));
    assert!(report.contains("moonset: 01:40 PM"));
}

#[test]
fn a_malformed_payload_becomes_an_in_band_error_report() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/current.json")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error": {"code": 1006, "message": "No matching location found."}}"#)
        .create();

    let tool = CurrentWeatherTool::new("test-key").with_base_url(server.url());
    let output = tool.run(json!({"location": "Nowhereville"})).unwrap();

    assert!(output.is_error_report());
    assert!(output.content().starts_with("Error occurred:"));
    assert!(output.content().contains("No matching location found."));
}

#[test]
fn a_forecast_response_missing_the_selected_day_is_reported() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/forecast.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"forecast": {"forecastday": [forecast_entry("Sunny")]}}).to_string())
        .create();

    let tool = WeatherForecastTool::new("test-key").with_base_url(server.url());
    let output = tool.run(json!({"location": "Oslo", "days": 3})).unwrap();

    assert!(output.is_error_report());
    assert!(output.content().contains("forecast day 3 missing"));
}

#[test]
fn invalid_arguments_never_reach_the_provider() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/forecast.json")
        .expect(0)
        .with_status(200)
        .with_body(forecast_body().to_string())
        .create();

    let tool = WeatherForecastTool::new("test-key").with_base_url(server.url());
    let err = tool.run(json!({"location": "Oslo", "days": 0})).unwrap_err();

    assert!(matches!(err, ToolError::Validation(_)));
    mock.assert();
}
