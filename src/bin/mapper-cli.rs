use std::path::PathBuf;

use clap::{Parser, Subcommand};

use traefik_mapper::config::loader::apply_env_overrides;
use traefik_mapper::config::MapperConfig;
use traefik_mapper::{Pipeline, RoutingDocument};

#[derive(Parser)]
#[command(name = "mapper-cli")]
#[command(about = "Inspect and preview Traefik mapper output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the configured rules to a local document and print the result
    Preview {
        /// Routing document (JSON) to rewrite
        file: PathBuf,

        /// Optional TOML config; TRAEFIK_MAPPER_* variables override it
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the rules the current configuration enables, in order
    Rules {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Fetch the output of a running mapper
    Fetch {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

fn rule_config(path: Option<PathBuf>) -> Result<MapperConfig, Box<dyn std::error::Error>> {
    let mut config: MapperConfig = match path {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => MapperConfig::default(),
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview { file, config } => {
            let pipeline = Pipeline::from_config(&rule_config(config)?.rules);
            let doc: RoutingDocument = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            println!("{}", serde_json::to_string_pretty(&pipeline.apply(doc))?);
        }
        Commands::Rules { config } => {
            let pipeline = Pipeline::from_config(&rule_config(config)?.rules);
            if pipeline.is_empty() {
                println!("(no rules enabled)");
            }
            for (i, name) in pipeline.rule_names().iter().enumerate() {
                println!("{}. {}", i + 1, name);
            }
        }
        Commands::Fetch { url } => {
            let res = reqwest::get(&url).await?;
            let status = res.status();
            if status.is_success() {
                let json: serde_json::Value = res.json().await?;
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                println!("Error: {} - {}", status, res.text().await?);
            }
        }
    }

    Ok(())
}
