use crate::{
    api,
    config::{PlannerConfig, ServerConfig},
    types::TripRequestPayload,
    TravelPlanner,
};
use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{env, net::SocketAddr, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the travel-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let planner = TravelPlanner::new(planner_config(&matches)?)?;

    match matches.subcommand() {
        Some(("serve", sub)) => {
            let bind = match sub.get_one::<SocketAddr>("bind") {
                Some(addr) => *addr,
                None => ServerConfig::from_env().bind,
            };
            api::serve(planner, bind).await?;
        }
        Some(("plan", sub)) => plan(&planner, sub).await?,
        _ => unreachable!("clap requires a subcommand"),
    }

    Ok(())
}

fn command() -> Command {
    Command::new("travel-planner")
        .version("0.1.0")
        .about("Generate multi-stop travel itineraries with an OpenAI-compatible model")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("Chat completion model (or set OPENAI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Provider API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Provider base URL (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Upstream request timeout in seconds (or set OPENAI_TIMEOUT_SECS)"),
        )
        .subcommand(
            Command::new("serve").about("Run the HTTP API").arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .value_name("ADDR")
                    .value_parser(value_parser!(SocketAddr))
                    .help("Listen address (or set TRAVEL_PLANNER_BIND, default 0.0.0.0:8080)"),
            ),
        )
        .subcommand(
            Command::new("plan")
                .about("Generate a single itinerary and print it")
                .arg(
                    Arg::new("start-date")
                        .long("start-date")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("end-date")
                        .long("end-date")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("location")
                        .short('l')
                        .long("location")
                        .value_name("CITY")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Preferred stop, in order; repeat for more"),
                )
                .arg(
                    Arg::new("interest")
                        .short('i')
                        .long("interest")
                        .value_name("TEXT")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Traveler interest; repeat for more"),
                )
                .arg(
                    Arg::new("start-location")
                        .long("start-location")
                        .value_name("PLACE"),
                )
                .arg(
                    Arg::new("travelers")
                        .long("travelers")
                        .value_name("COUNT")
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("max-travel-hours")
                        .long("max-travel-hours")
                        .value_name("HOURS")
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("transport")
                        .long("transport")
                        .value_name("TYPE"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the result as JSON"),
                ),
        )
}

fn planner_config(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let api_key = resolve_api_key(
        matches.get_one::<String>("api-key").cloned(),
        env::var("OPENAI_API_KEY").ok(),
    )?;

    let mut config = PlannerConfig::new(api_key).with_env_overrides();
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*timeout));
    }

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);
    Ok(config)
}

/// Get API key from argument or environment; blank values count as missing.
fn resolve_api_key(flag: Option<String>, env_value: Option<String>) -> anyhow::Result<String> {
    flag.filter(|key| !key.trim().is_empty())
        .or_else(|| env_value.filter(|key| !key.trim().is_empty()))
        .ok_or_else(|| {
            anyhow!("API key is required. Set OPENAI_API_KEY environment variable or use --api-key")
        })
}

fn trip_payload(matches: &ArgMatches) -> TripRequestPayload {
    let strings = |id: &str| {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect::<Vec<_>>())
    };

    TripRequestPayload {
        start_date: matches.get_one::<String>("start-date").cloned(),
        end_date: matches.get_one::<String>("end-date").cloned(),
        preferred_locations: strings("location"),
        interests: strings("interest"),
        start_location: matches.get_one::<String>("start-location").cloned(),
        number_of_travelers: matches.get_one::<i64>("travelers").copied(),
        max_travel_time_per_day: matches.get_one::<i64>("max-travel-hours").copied(),
        transport_type: matches.get_one::<String>("transport").cloned(),
    }
}

async fn plan(planner: &TravelPlanner, matches: &ArgMatches) -> anyhow::Result<()> {
    let payload = trip_payload(matches);
    info!("Sending itinerary request to {}", planner.model());

    match planner.generate_from_payload(payload).await {
        Ok(result) => {
            if matches.get_flag("json") {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).context("serializing itinerary")?
                );
            } else {
                println!("\n{}", result.summary());
            }
            info!("Itinerary generation completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Itinerary generation failed: {}", e);
            Err(e.into())
        }
    }
}
