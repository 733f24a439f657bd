use std::collections::HashSet;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tagline_cli::HttpClient;
use tagline_composer::Settings;
use tagline_engine::{SegmentKind, Trigger, highlight, locate, tokenize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// tagline composer tools: inspect how text is tokenized and highlighted.
#[derive(Parser, Debug)]
#[command(name = "tagline-compose")]
#[command(about = "Inspect mention tokenization, word boundaries and suggestions")]
struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a message as JSON
    Tokenize {
        /// Message text
        text: String,
    },

    /// Render text with confirmed tags marked
    Highlight {
        /// Message text
        text: String,

        /// Confirmed tag including its trigger, e.g. `@alice` (repeatable)
        #[arg(short, long = "confirmed")]
        confirmed: Vec<String>,

        /// Print HTML instead of bracket markers
        #[arg(long)]
        html: bool,
    },

    /// Show the word around a cursor position
    Locate {
        /// Text to inspect
        text: String,

        /// Cursor position in characters
        cursor: usize,
    },

    /// Query a running tagline-server for suggestions
    Suggest {
        /// Search keyword (without trigger)
        query: String,

        /// Server base URL (defaults to `server.base_url` from the config file)
        #[arg(long)]
        server: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "tagline_cli=debug,tagline_composer=debug,tagline_engine=trace"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Tokenize { text } => run_tokenize(&text),
        Commands::Highlight {
            text,
            confirmed,
            html,
        } => {
            run_highlight(&text, confirmed, html);
            Ok(())
        }
        Commands::Locate { text, cursor } => {
            run_locate(&text, cursor);
            Ok(())
        }
        Commands::Suggest { query, server } => run_suggest(&query, server),
    }
}

fn run_tokenize(text: &str) -> Result<()> {
    let tokens = tokenize(text);
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

fn run_highlight(text: &str, confirmed: Vec<String>, html: bool) {
    let confirmed: HashSet<String> = confirmed.into_iter().collect();
    let highlighted = highlight(text, &confirmed);
    if html {
        println!("{}", highlighted.to_html());
        return;
    }
    let mut out = String::new();
    for segment in highlighted.segments() {
        match segment.kind {
            SegmentKind::Plain => out.push_str(&segment.text),
            SegmentKind::ConfirmedTag => {
                out.push('[');
                out.push_str(&segment.text);
                out.push(']');
            }
        }
    }
    println!("{}", out);
}

fn run_locate(text: &str, cursor: usize) {
    let span = locate(text, cursor);
    println!("start:  {}", span.start);
    println!("end:    {}", span.end);
    println!("word:   {:?}", span.word);
    match Trigger::strip(span.word) {
        Some((trigger, keyword)) => println!("search: {} {:?}", trigger, keyword),
        None => println!("search: none"),
    }
}

fn run_suggest(query: &str, server: Option<String>) -> Result<()> {
    let base_url = match server {
        Some(url) => url,
        None => Settings::load()?.server.base_url,
    };
    let client = HttpClient::new(base_url);
    let found = client
        .search_blocking(query)
        .with_context(|| format!("querying {}", client.base_url()))?;
    if found.is_empty() {
        eprintln!("no suggestions for {:?}", query);
    }
    for suggestion in found {
        println!("{}\t{}", suggestion.id, suggestion.label);
    }
    Ok(())
}
