mod snapshot;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stocksnap-cli")]
#[command(about = "Stock name, price, and headline snapshots from Yahoo Finance")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch name, price, and recent headlines for one or more tickers
    Snapshot {
        /// Ticker symbols, processed in the order given
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Headlines per ticker (defaults to `STOCKSNAP_NEWS_COUNT`)
        #[arg(long, value_parser = parse_news_count)]
        news: Option<usize>,

        /// Ask the completion service for a sentiment summary per ticker
        #[arg(long)]
        summarize: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print recent headlines for one ticker
    News {
        ticker: String,

        /// Headlines to print (defaults to `STOCKSNAP_NEWS_COUNT`)
        #[arg(long, value_parser = parse_news_count)]
        news: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_news_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw
        .parse()
        .map_err(|e| format!("`{raw}` is not a count: {e}"))?;
    if count == 0 {
        return Err("news count must be at least 1".to_string());
    }
    Ok(count)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = stocksnap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Snapshot {
            tickers,
            news,
            summarize,
            format,
        }) => {
            let count = news.unwrap_or(config.news_count);
            snapshot::run_snapshot_command(&config, &tickers, count, summarize, format).await?;
        }
        Some(Commands::News { ticker, news }) => {
            let count = news.unwrap_or(config.news_count);
            snapshot::run_news_command(&config, &ticker, count).await?;
        }
        None => println!("stocksnap-cli: pass a subcommand (see --help)"),
    }

    Ok(())
}
