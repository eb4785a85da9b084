use clap::{Arg, Command};
use tracing::{error, info};

use crate::tools::{CurrentWeatherTool, WeatherForecastTool, WikipediaTool};
use crate::{enable_log, regularize_block, ToolRegistry};

/// CLI entry point for the agent-tools binary
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let matches = Command::new("agent-tools")
        .version("0.1.0")
        .about("Typed tool adapters (weather, Wikipedia) for LLM agent frameworks")
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("PATH")
                .help("Write diagnostic logs to PATH"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level: debug, info, warning, error, critical")
                .default_value("info"),
        )
        .arg(
            Arg::new("log-mode")
                .long("log-mode")
                .value_name("MODE")
                .help("Log file mode: truncate or append")
                .default_value("truncate"),
        )
        .subcommand(Command::new("list").about("List registered tools and their argument schemas"))
        .subcommand(
            Command::new("run")
                .about("Invoke a tool by name")
                .arg(Arg::new("tool").help("Tool name").required(true).index(1))
                .arg(
                    Arg::new("args")
                        .short('a')
                        .long("args")
                        .value_name("JSON")
                        .help("Argument mapping as a JSON object")
                        .default_value("{}"),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    if let Some(path) = matches.get_one::<String>("log") {
        enable_log(
            Some(path),
            matches.get_one::<String>("log-level").unwrap(),
            matches.get_one::<String>("log-mode").unwrap(),
        )?;
    }

    match matches.subcommand() {
        Some(("list", _)) => {
            let definitions =
                tokio::task::spawn_blocking(|| build_registry().definitions()).await?;
            for definition in definitions {
                println!("{}", serde_json::to_string_pretty(&definition)?);
            }
        }
        Some(("run", sub)) => {
            let tool = sub.get_one::<String>("tool").unwrap().clone();
            let arguments: serde_json::Value =
                serde_json::from_str(sub.get_one::<String>("args").unwrap())?;

            info!("Invoking tool {}", tool);

            // The registry holds blocking HTTP clients and tool invocations
            // block on the backing service call, so everything runs off the
            // async runtime threads.
            let result =
                tokio::task::spawn_blocking(move || build_registry().invoke(&tool, arguments))
                    .await?;

            match result {
                Ok(output) => print!("{}", regularize_block(output.content())),
                Err(err) => {
                    error!("Tool invocation failed: {}", err);
                    return Err(err.into());
                }
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn build_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(WikipediaTool::default());

    match (
        CurrentWeatherTool::from_env(),
        WeatherForecastTool::from_env(),
    ) {
        (Ok(current), Ok(forecast)) => {
            registry.register(current);
            registry.register(forecast);
        }
        _ => info!("WEATHER_API_KEY not set, weather tools disabled"),
    }

    registry
}
