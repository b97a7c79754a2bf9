//! ShopLink connector maintenance tool.
//!
//! Inspects and repairs the endpoint database that the synchronization
//! controllers and the correlation store share.
//!
//! Usage:
//!   shoplink --config config/config.json stats
//!   shoplink --db connector.db pull --type category --limit 10
//!   shoplink link --type category --endpoint 3f2a... --host 42

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shoplink_connector::{Connector, ConnectorConfig, ConnectorInfo, DEFAULT_CONFIG_PATH};
use shoplink_mapping::{ClearScope, WipeConfirmation};
use shoplink_model::QueryFilter;
use shoplink_types::IdentityType;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shoplink")]
#[command(about = "ShopLink connector maintenance tool")]
struct Args {
    /// Path to the connector config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Database file; overrides the config file entirely
    #[arg(long)]
    db: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the connector identity
    Info,

    /// Create or upgrade the database schema
    Install,

    /// Count unlinked entities per type
    Stats,

    /// Print unlinked entities of one type as JSON
    Pull {
        #[arg(long = "type")]
        entity_type: IdentityType,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Record a host/endpoint link
    Link {
        #[arg(long = "type")]
        entity_type: IdentityType,

        #[arg(long)]
        endpoint: String,

        #[arg(long)]
        host: i64,
    },

    /// Remove links of one type
    Unlink {
        #[arg(long = "type")]
        entity_type: IdentityType,

        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long)]
        host: Option<i64>,

        /// Remove every link of the type
        #[arg(long, conflicts_with_all = ["endpoint", "host"])]
        all_of_type: bool,
    },

    /// Clear links of one type, or every link
    Clear {
        #[arg(long = "type", required_unless_present = "all", conflicts_with = "all")]
        entity_type: Option<IdentityType>,

        /// Clear every link of every type
        #[arg(long, requires = "yes")]
        all: bool,

        /// Confirm a full wipe
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let open = || -> Result<Connector> {
        let config = load_config(&args)?;
        Connector::open(&config)
            .with_context(|| format!("Failed to open database {}", config.db.path.display()))
    };

    match &args.command {
        Command::Info => print_json(&ConnectorInfo::current())?,
        Command::Install => {
            let connector = open()?;
            let version = connector
                .database()
                .schema_version()
                .context("Failed to read schema version")?;
            println!("schema version {version}");
        }
        Command::Stats => {
            let connector = open()?;
            let stats = connector.statistics().context("Failed to count unlinked entities")?;
            for stat in stats {
                println!("{:<20} {}", stat.identity_type.as_str(), stat.available);
            }
        }
        Command::Pull { entity_type, limit } => {
            let connector = open()?;
            let mut filter = QueryFilter::new();
            if let Some(limit) = limit {
                filter = filter.with_limit(*limit);
            }
            let records = connector
                .registry()
                .get(*entity_type)?
                .discover_unlinked(&filter)
                .with_context(|| format!("Failed to discover unlinked {entity_type} records"))?;
            debug!("pulled {} {entity_type} record(s)", records.len());
            print_json(&records)?;
        }
        Command::Link { entity_type, endpoint, host } => {
            open()?
                .mapper()
                .save(*entity_type, endpoint, *host)
                .context("Failed to save link")?;
            info!("linked {entity_type} {endpoint}<->{host}");
        }
        Command::Unlink { entity_type, endpoint, host, all_of_type } => {
            if endpoint.is_none() && host.is_none() && !all_of_type {
                bail!("unlink needs --endpoint, --host or --all-of-type");
            }
            let removed = open()?
                .mapper()
                .delete(*entity_type, endpoint.as_deref(), *host)
                .context("Failed to delete links")?;
            println!("removed {removed} link(s)");
        }
        Command::Clear { entity_type, all, yes } => {
            let scope = match (*entity_type, *all && *yes) {
                (Some(t), false) => ClearScope::Type(t),
                (None, true) => ClearScope::Everything(WipeConfirmation::confirmed()),
                _ => bail!("clear needs either --type or --all --yes"),
            };
            let removed = open()?.mapper().clear(scope).context("Failed to clear links")?;
            println!("removed {removed} link(s)");
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Logs go to stderr so `pull` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(args: &Args) -> Result<ConnectorConfig> {
    if let Some(db) = &args.db {
        return Ok(ConnectorConfig::for_database(db.clone()));
    }
    ConnectorConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{json}");
    Ok(())
}
