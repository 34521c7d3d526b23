//! A simple program demonstrates how to use `travel-agent` as a library.

#[macro_use]
extern crate tracing;

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};
use tokio::select;
use tokio::time::sleep;
use travel_agent::ToolboxBuilder;
use travel_agent::tools::accommodation::{
    AccommodationSearch, DEFAULT_ACTOR_ID,
};
use travel_agent_apify::{ApifyConfigBuilder, ApifyPlatform};

const BAR_CHAR: &str = "▎";

/// Call the travel tools from the terminal.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tool definitions as JSON.
    Tools,
    /// Call a tool by name, the way an agent runtime would.
    Call {
        /// Name of the tool.
        name: String,
        /// Arguments as a JSON object.
        #[arg(default_value = "{}")]
        arguments: String,
    },
    /// Print today's date.
    Today,
    /// Look up general information about a country.
    Country {
        /// Name of the country.
        name: String,
    },
    /// Search accommodation in a city.
    Accommodation {
        #[arg(long)]
        city: String,
        /// Check-in date, YYYY-MM-DD.
        #[arg(long)]
        check_in: Option<String>,
        /// Check-out date, YYYY-MM-DD.
        #[arg(long)]
        check_out: Option<String>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
        /// Per-night price range, e.g. "50-150".
        #[arg(long)]
        price_range: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut builder = ToolboxBuilder::default();
    match env::var("APIFY_TOKEN") {
        Ok(token) => {
            let mut config =
                ApifyConfigBuilder::with_actor(DEFAULT_ACTOR_ID, token);
            if let Ok(base_url) = env::var("APIFY_BASE_URL") {
                config = config.with_base_url(base_url);
            }
            let platform = ApifyPlatform::new(config.build());
            builder = builder
                .with_accommodation_search(AccommodationSearch::new(platform));
        }
        Err(_) => {
            debug!("APIFY_TOKEN is not set, accommodation search is disabled");
        }
    }
    let toolbox = builder.build();

    let (name, arguments) = match cli.command {
        Command::Tools => {
            let definitions = toolbox.definitions();
            match serde_json::to_string_pretty(&definitions) {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    return fail(&format!("cannot print definitions: {err}"));
                }
            }
            return ExitCode::SUCCESS;
        }
        Command::Call { name, arguments } => {
            match serde_json::from_str(&arguments) {
                Ok(arguments) => (name, arguments),
                Err(err) => {
                    return fail(&format!("arguments are not valid JSON: {err}"));
                }
            }
        }
        Command::Today => ("today".to_owned(), json!({})),
        Command::Country { name } => {
            ("destination_info".to_owned(), json!({ "country": name }))
        }
        Command::Accommodation {
            city,
            check_in,
            check_out,
            adults,
            children,
            price_range,
        } => {
            let mut arguments = Map::new();
            arguments.insert("city".to_owned(), city.into());
            let optional = [
                ("checkIn", check_in.map(Value::from)),
                ("checkOut", check_out.map(Value::from)),
                ("adults", adults.map(Value::from)),
                ("children", children.map(Value::from)),
                ("minMaxPrice", price_range.map(Value::from)),
            ];
            for (key, value) in optional {
                if let Some(value) = value {
                    arguments.insert(key.to_owned(), value);
                }
            }
            ("search_accommodation".to_owned(), Value::Object(arguments))
        }
    };

    if !toolbox.tool_names().any(|tool| tool == name) {
        if name == "search_accommodation" {
            return fail("APIFY_TOKEN environment variable is not set");
        }
        return fail(&format!("unknown tool `{name}`"));
    }

    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}")
    {
        progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    progress_bar.set_message(format!("Running {name}..."));

    let call = toolbox.call(&name, arguments);
    tokio::pin!(call);
    let output = loop {
        select! {
            output = &mut call => break output,
            _ = sleep(Duration::from_millis(100)) => progress_bar.inc(1),
        }
    };
    progress_bar.finish_and_clear();

    println!("{}{}", BAR_CHAR.bright_cyan(), name.bright_white().bold());
    println!("{output}");
    ExitCode::SUCCESS
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{} {message}", "error:".bright_red().bold());
    ExitCode::FAILURE
}
