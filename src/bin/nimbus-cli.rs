//! Command-line client for a running Nimbus gateway.

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "nimbus-cli")]
#[command(about = "Command-line client for the Nimbus weather gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest places matching a search term
    Suggest {
        /// Free-text place name
        query: String,
    },
    /// Show current conditions and the next forecast entries
    Weather {
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<String>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Suggest { query } => client
            .get(format!("{base}/api/location-suggestions"))
            .query(&[("query", query)]),
        Commands::Weather {
            city,
            country,
            lat,
            lon,
        } => {
            let mut params = vec![("city", city), ("country", country)];
            if let (Some(lat), Some(lon)) = (lat, lon) {
                params.push(("lat", lat));
                params.push(("lon", lon));
            }
            client.get(format!("{base}/api/weather")).query(&params)
        }
    };

    let res = request.send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
