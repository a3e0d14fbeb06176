use clap::{Parser, Subcommand};
use client::EmployeeClient;
use dotenvy::dotenv;
use models::{EmployeeId, EmployeeView};
use tracing::debug;

/// Command line front-end for the employee directory service.
#[derive(Parser, Debug)]
#[command(name = "emps", version, about)]
struct Cli {
    /// Collection URL, e.g. http://127.0.0.1:4567/employees
    #[arg(long, env = "EMPS_BASE_URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every employee
    List,
    /// Show one employee
    Get { id: String },
    /// Create or replace an employee
    Save {
        id: String,
        first_name: String,
        last_name: String,
    },
}

fn resolve_base_url(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(url) = flag {
        return Ok(url);
    }
    let cfg = configs::AppConfig::load_or_env()?;
    Ok(cfg.client.base_url)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_cli();

    let cli = Cli::parse();
    let base_url = resolve_base_url(cli.base_url)?;
    debug!(%base_url, "using employee directory");
    let client = EmployeeClient::new(&base_url)?;

    match cli.command {
        Command::List => {
            let all = client.fetch_all().await?;
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
        Command::Get { id } => match client.fetch_one(&id).await? {
            Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
            None => anyhow::bail!("employee {id} not found"),
        },
        Command::Save { id, first_name, last_name } => {
            let view = EmployeeView {
                employee_id: EmployeeId::from_key(&id),
                first_name,
                last_name,
            };
            let saved = client.save(&view).await?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
    }
    Ok(())
}
