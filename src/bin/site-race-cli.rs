use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use site_race::http::{CheckTextRequest, FoundResponse};

#[derive(Parser)]
#[command(name = "site-race-cli")]
#[command(about = "Client for the site-race API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find which of the given sites contains the text
    Check {
        /// Text to look for (case-sensitive)
        #[arg(short, long)]
        text: String,

        /// Site addresses to race
        #[arg(required = true)]
        sites: Vec<String>,
    },
    /// Check server health
    Health,
}

/// The API answered with a status the client does not treat as a result.
#[derive(Debug, Error)]
#[error("API returned status {status}: {body}")]
struct ApiError {
    status: StatusCode,
    body: String,
}

impl ApiError {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        Self { status, body }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Check { text, sites } => {
            let res = client
                .post(format!("{}/checkText", cli.url))
                .json(&CheckTextRequest {
                    sites,
                    search_text: text,
                })
                .send()
                .await?;
            println!("{}", check_result(res).await?);
        }
        Commands::Health => {
            let res = client.get(format!("{}/checkHealth", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Line to print for a `/checkText` answer; any other status is an error.
async fn check_result(res: reqwest::Response) -> Result<String, Box<dyn std::error::Error>> {
    match res.status() {
        StatusCode::OK => {
            let found: FoundResponse = res.json().await?;
            Ok(found.found_at_site)
        }
        StatusCode::NO_CONTENT => Ok("not found".to_string()),
        _ => Err(ApiError::from_response(res).await.into()),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return Err(ApiError::from_response(res).await.into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
