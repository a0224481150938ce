use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Query a running deal relay", long_about = None)]
struct Cli {
    /// Relay base URL
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    /// Origin header to send, to check the CORS allow-list
    #[arg(short, long)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List demo-sale deals
    Deals,
    /// Show the most relevant activity of a deal
    Activity {
        /// Numeric deal id
        deal_id: u64,
    },
    /// Look up a deal field by numeric id or hex key
    Field {
        key: String,
    },
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Deals => "/deals".to_string(),
            Commands::Activity { deal_id } => format!("/deals/{}/activity", deal_id),
            Commands::Field { key } => format!("/deal-fields/{}", key),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(origin) = &cli.origin {
        headers.insert(ORIGIN, HeaderValue::from_str(origin)?);
    }

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client.get(&url).headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("Status: {}", status);
    match res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN) {
        Some(origin) => println!("Allowed origin: {}", origin.to_str().unwrap_or("<non-ascii>")),
        None => println!("Allowed origin: (none)"),
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }
    Ok(())
}
