use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loggifly_helper::config::load_config;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "loggifly-cli")]
#[command(about = "Management CLI for the LoggiFly helper", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5353")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check helper liveness
    Health,
    /// Show the effective configuration
    Config,
    /// Show log file statistics and counters
    Stats,
    /// Validate a helper config file without contacting the helper
    Check {
        /// Path to the TOML config file
        path: PathBuf,
    },
    /// Send a test notification to the webhook
    Send {
        #[arg(long, default_value = "loggifly-cli")]
        container: String,
        #[arg(long, default_value = "test")]
        keyword: String,
        #[arg(long, default_value = "Test notification")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Config => client.get(format!("{}/config", base)).send().await?,
        Commands::Stats => client.get(format!("{}/stats", base)).send().await?,
        Commands::Check { path } => return check_config(&path),
        Commands::Send {
            container,
            keyword,
            message,
        } => {
            client
                .post(format!("{}/webhook", base))
                .json(&json!({
                    "container": container,
                    "keyword": keyword,
                    "message": message,
                }))
                .send()
                .await?
        }
    };
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: helper returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn check_config(path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    println!(
        "{} is valid: {}:{} -> {} ({}, rotation {}, {} backups of {})",
        path.display(),
        config.server.host,
        config.server.port,
        config.log.file.display(),
        config.log.format.as_str(),
        if config.log.rotation { "on" } else { "off" },
        config.log.backup_count,
        config.log.max_size,
    );
    Ok(())
}
