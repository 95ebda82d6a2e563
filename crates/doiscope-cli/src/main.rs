use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use doiscope_core::{
    AppConfig, DocumentSnapshot, DoiCandidate, DoiFinder, Invocation, OncePresenter, Presenter,
    hostname_from_url,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "doiscope",
    about = "Find the DOI of a scholarly article in a saved web page",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the DOI of a page. Reads from stdin when FILE is `-`.
    Find {
        file: String,
        /// Address the page was served from.
        #[arg(long, conflicts_with = "host", required_unless_present = "host")]
        url: Option<String>,
        /// Hostname the page was served from.
        #[arg(long)]
        host: Option<String>,
        /// Live page title, when it differs from the `<title>` element.
        #[arg(long)]
        title: Option<String>,
        /// Skip the host-dependent wait before extraction.
        #[arg(long)]
        no_delay: bool,
    },

    /// List detection strategies in the order they run.
    Strategies,

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path.
    Path,
    /// Print the effective configuration.
    Show,
    /// Write the default configuration to disk.
    Init {
        #[arg(long)]
        force: bool,
    },
}

// ─── Output ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FindOutput<'a> {
    doi: Option<&'a str>,
    url: Option<String>,
}

/// Prints the DOI and its resolver URL.
struct StdoutPresenter {
    json: bool,
}

impl Presenter for StdoutPresenter {
    fn present(&self, doi: &DoiCandidate) {
        let url = doi.to_doi().ok().map(|d| d.url);
        if self.json {
            let out = FindOutput {
                doi: Some(doi.as_str()),
                url,
            };
            match serde_json::to_string_pretty(&out) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => tracing::error!(error = %e, "failed to render JSON"),
            }
        } else {
            match url {
                Some(url) => println!("{doi}\t{url}"),
                None => println!("{doi}"),
            }
        }
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

const EXIT_NOT_FOUND: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Find {
            file,
            url,
            host,
            title,
            no_delay,
        } => {
            let found = cmd_find(&file, url, host, title, no_delay, cli.json).await?;
            if !found {
                std::process::exit(EXIT_NOT_FOUND);
            }
        }
        Commands::Strategies => cmd_strategies(cli.json)?,
        Commands::Config { action } => cmd_config(action, cli.json)?,
    }

    Ok(())
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %AppConfig::config_path().display(),
                error = %e,
                "failed to load config, using defaults"
            );
            AppConfig::default()
        }
    }
}

fn read_page(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read page from stdin")?;
        return Ok(buf);
    }
    let path = PathBuf::from(file);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

async fn cmd_find(
    file: &str,
    url: Option<String>,
    host: Option<String>,
    title: Option<String>,
    no_delay: bool,
    json: bool,
) -> Result<bool> {
    let config = load_config();
    let finder = DoiFinder::new(&config.hosts);
    let markup = read_page(file)?;

    let hostname = match (url, host) {
        (Some(url), _) => hostname_from_url(&url)?,
        (None, Some(host)) => host,
        (None, None) => bail!("either --url or --host is required"),
    };

    let invocation = if no_delay {
        Invocation::immediate(&finder)
    } else {
        Invocation::new(&finder, &config.schedule, &hostname)
    };
    let presenter = OncePresenter::new(StdoutPresenter { json });

    let detection = invocation
        .run(
            || {
                let snapshot = DocumentSnapshot::capture(markup, &hostname);
                Some(match title {
                    Some(title) => snapshot.with_title(title),
                    None => snapshot,
                })
            },
            &presenter,
        )
        .await;

    match detection {
        Some(detection) => {
            tracing::info!(strategy = detection.strategy, "detected");
            Ok(true)
        }
        None => {
            if json {
                let out = FindOutput { doi: None, url: None };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                eprintln!("no DOI found");
            }
            Ok(false)
        }
    }
}

fn cmd_strategies(json: bool) -> Result<()> {
    let config = load_config();
    let finder = DoiFinder::new(&config.hosts);

    #[derive(Serialize)]
    struct Row<'a> {
        order: usize,
        name: &'a str,
        host: Option<&'a str>,
    }

    let rows: Vec<Row> = finder
        .strategies()
        .iter()
        .enumerate()
        .map(|(idx, s)| Row {
            order: idx + 1,
            name: s.name(),
            host: s.scope().map(|scope| scope.as_str()),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in rows {
            println!("{:>2}. {:<20} {}", row.order, row.name, row.host.unwrap_or("any host"));
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, json: bool) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", AppConfig::config_path().display());
        }
        ConfigAction::Show => {
            let config = AppConfig::load().context("failed to load config")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Init { force } => {
            let path = AppConfig::config_path();
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            AppConfig::default().save_to(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
