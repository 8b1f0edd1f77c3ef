use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "radio-cli")]
#[command(about = "Command-line client for a running radio proxy", long_about = None)]
struct Cli {
    /// Base URL of the proxy API, including its prefix.
    #[arg(short, long, default_value = "http://localhost:8001/api")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Most clicked stations
    Popular {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Search stations by name, country, tag or language
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },
    /// Countries with at least one station
    Countries,
    /// Genres by station count
    Genres {
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Station details
    Station { station_id: String },
    /// Register a click for a station
    Click { station_id: String },
    /// Record a status check
    Ping {
        #[arg(default_value = "radio-cli")]
        client_name: String,
    },
    /// List recorded status checks
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Popular { limit } => client
            .get(format!("{}/radio/popular", base))
            .query(&[("limit", limit)]),
        Commands::Search {
            name,
            country,
            tag,
            language,
            limit,
            offset,
        } => {
            let mut params = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
            let filters = [("name", name), ("country", country), ("tag", tag), ("language", language)];
            for (key, value) in filters {
                if let Some(value) = value {
                    params.push((key, value));
                }
            }
            client.get(format!("{}/radio/search", base)).query(&params)
        }
        Commands::Countries => client.get(format!("{}/radio/countries", base)),
        Commands::Genres { limit } => client
            .get(format!("{}/radio/genres", base))
            .query(&[("limit", limit)]),
        Commands::Station { station_id } => {
            client.get(format!("{}/radio/station/{}", base, station_id))
        }
        Commands::Click { station_id } => {
            client.post(format!("{}/radio/click/{}", base, station_id))
        }
        Commands::Ping { client_name } => client
            .post(format!("{}/status", base))
            .json(&json!({ "client_name": client_name })),
        Commands::Status => client.get(format!("{}/status", base)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
