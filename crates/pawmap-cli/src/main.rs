//! `pawmap` — offline venue ingestion and hours inspection.
//!
//! # Usage
//!
//! ```bash
//! # Build the venue dataset from a scrape, keeping venues from earlier runs
//! pawmap ingest scraped.json --existing locations.json --season winter -o locations.json
//!
//! # Normalize one day's hours text
//! pawmap hours "12 to 11 PM"
//!
//! # Normalize a week of {day, hours} entries read from stdin
//! pawmap normalize < opening_hours.json
//!
//! # Which venues are open at a given local time
//! pawmap open-now locations.json --at 2026-07-01T18:30
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: `EnvFilter` directives, e.g. `pawmap_hours=debug` (default: info). Logs go to stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pawmap_hours::{
    ingest, normalize, range_to_military, RawDayHours, ScrapedPlace, Season, Venue,
};

#[derive(Parser)]
#[command(name = "pawmap", version, about = "Dog-friendly venue data tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the venue dataset from scraped places
    Ingest {
        /// Scraped places JSON array (reads stdin if omitted)
        input: Option<PathBuf>,
        /// Previous venue dataset to carry hours forward from and merge in
        #[arg(short, long)]
        existing: Option<PathBuf>,
        /// Season the scrape's hours belong to (default: current month's)
        #[arg(short, long)]
        season: Option<Season>,
        /// Output file (writes stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize one day's hours text, e.g. "12 to 11 PM"
    Hours {
        text: String,
    },
    /// Normalize a JSON array of {day, hours} entries into one season's hours
    Normalize {
        /// Input file (reads stdin if omitted)
        input: Option<PathBuf>,
    },
    /// Print each venue's open/closed/unknown state
    OpenNow {
        /// Venue dataset JSON array (reads stdin if omitted)
        venues: Option<PathBuf>,
        /// Local wall-clock time, e.g. 2026-07-01T18:30 (default: now)
        #[arg(long, value_parser = parse_local_time)]
        at: Option<NaiveDateTime>,
    },
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Ingest {
            input,
            existing,
            season,
            output,
        } => {
            let places: Vec<ScrapedPlace> = read_json(input.as_deref())?;
            let existing: Vec<Venue> = match existing {
                Some(path) => read_json(Some(&path))?,
                None => Vec::new(),
            };
            let season = season.unwrap_or_else(|| Season::of(&Local::now().naive_local()));
            info!(places = places.len(), existing = existing.len(), %season, "ingesting");

            let venues = ingest(&places, &existing, season);
            let json = serde_json::to_string_pretty(&venues)?;
            write_output(output.as_deref(), &json)?;
        }
        Command::Hours { text } => {
            let range = range_to_military(&text)
                .with_context(|| format!("cannot normalize hours '{text}'"))?;
            println!("{range}");
        }
        Command::Normalize { input } => {
            let entries: Vec<RawDayHours> = read_json(input.as_deref())?;
            let hours = normalize(&entries).context("cannot normalize opening hours")?;
            println!("{}", serde_json::to_string_pretty(&hours)?);
        }
        Command::OpenNow { venues, at } => {
            let venues: Vec<Venue> = read_json(venues.as_deref())?;
            let at = at.unwrap_or_else(|| Local::now().naive_local());
            let mut out = io::stdout().lock();
            for venue in &venues {
                writeln!(out, "{}\t{}", venue.name, venue.hours.open_state(&at))?;
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let text = match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let source = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    serde_json::from_str(&text).with_context(|| format!("parsing JSON from {source}"))
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, format!("{json}\n")).with_context(|| format!("writing {}", p.display()))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_local_time(s: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got '{s}'"))
}
