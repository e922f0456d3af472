//! `meets` CLI — find free meeting slots across several calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for the range, window and calendars in a request file
//! meets free -i request.json
//!
//! # Override the range and the daily window from the command line
//! meets free -i request.json --range "03/16/2026 - 03/20/2026" --from 10am --to 4:30pm
//!
//! # Machine-readable output
//! meets free -i request.json --format json
//!
//! # List calendars in display order
//! meets calendars -i request.json
//! ```
//!
//! Set `RUST_LOG=meets_engine=debug` (or pass `-v`) to trace the pipeline on stderr.

use std::collections::BTreeMap;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use meets_engine::input::{parse_date_range, parse_time_of_day, parse_timezone};
use meets_engine::source::{self, CalendarRecord};
use meets_engine::{format, ScheduleRequest, TimeBlock, TimeWindow};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meets", version, about = "Find common free time across calendars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline stages to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free slots within the date range and daily window
    Free {
        /// Request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date range, e.g. "03/16/2026 - 03/20/2026" (both days inclusive)
        #[arg(long)]
        range: Option<String>,
        /// Start of the daily window, e.g. 9am or 09:00
        #[arg(long)]
        from: Option<String>,
        /// End of the daily window, e.g. 5pm or 17:00
        #[arg(long)]
        to: Option<String>,
        /// IANA timezone, e.g. America/Los_Angeles
        #[arg(long)]
        tz: Option<String>,
        /// Reference date (YYYY-MM-DD) for the default range; defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the request's calendars: primary first, then selected, then the rest
    Calendars {
        /// Request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Contents of a request file. Every scheduling field is optional and falls
/// back to the command-line flag, then to the defaults.
#[derive(Deserialize, Default)]
struct RequestFile {
    timezone: Option<String>,
    daterange: Option<String>,
    begin_time: Option<String>,
    end_time: Option<String>,
    #[serde(default)]
    calendars: Vec<CalendarRecord>,
}

#[derive(Serialize)]
struct FreeSlotDto {
    start: String,
    end: String,
    label: String,
    duration_minutes: i64,
}

impl From<&TimeBlock> for FreeSlotDto {
    fn from(b: &TimeBlock) -> Self {
        Self {
            start: b.start().to_rfc3339(),
            end: b.end().to_rfc3339(),
            label: b.label().to_string(),
            duration_minutes: b.duration_minutes(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Free {
            input,
            range,
            from,
            to,
            tz,
            today,
            format,
        } => {
            let file = read_request_file(input.as_deref())?;
            let tz = resolve_timezone(tz.as_deref().or(file.timezone.as_deref()))?;
            let today = today.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            let request = build_request(
                &file,
                Overrides {
                    range: range.as_deref(),
                    from: from.as_deref(),
                    to: to.as_deref(),
                },
                today,
                tz,
            )?;

            let events = source::events_by_calendar(&file.calendars)
                .context("Failed to read calendar events")?;
            let free = meets_engine::find_free_time(&request, &events)
                .context("Failed to compute free time")?;

            let rendered = match format {
                OutputFormat::Text => render_text(&free),
                OutputFormat::Json => {
                    let dtos: Vec<FreeSlotDto> = free.iter().map(FreeSlotDto::from).collect();
                    serde_json::to_string_pretty(&dtos)?
                }
            };
            println!("{}", rendered);
        }
        Commands::Calendars { input } => {
            let mut file = read_request_file(input.as_deref())?;
            source::sort_calendars(&mut file.calendars);
            for cal in &file.calendars {
                let mut marks = Vec::new();
                if cal.primary {
                    marks.push("primary");
                }
                if cal.selected {
                    marks.push("selected");
                }
                if cal.is_owned() {
                    marks.push("owner");
                }
                if marks.is_empty() {
                    println!("{}\t{}", cal.summary, cal.id);
                } else {
                    println!("{}\t{}\t[{}]", cal.summary, cal.id, marks.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "meets_engine=debug,meets=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Values given on the command line, which win over the request file.
struct Overrides<'a> {
    range: Option<&'a str>,
    from: Option<&'a str>,
    to: Option<&'a str>,
}

fn build_request(file: &RequestFile, overrides: Overrides<'_>, today: NaiveDate, tz: Tz) -> Result<ScheduleRequest> {
    let defaults = ScheduleRequest::with_defaults(today, tz)?;

    let (begin_date, end_date) = match overrides.range.or(file.daterange.as_deref()) {
        Some(text) => parse_date_range(text).with_context(|| format!("Invalid date range: '{}'", text))?,
        None => (defaults.begin_date, defaults.end_date),
    };

    let begin_time = match overrides.from.or(file.begin_time.as_deref()) {
        Some(text) => parse_time_of_day(text)?,
        None => defaults.window.begin(),
    };
    let end_time = match overrides.to.or(file.end_time.as_deref()) {
        Some(text) => parse_time_of_day(text)?,
        None => defaults.window.end(),
    };
    let window = TimeWindow::new(begin_time, end_time)?;

    tracing::debug!(%begin_date, %end_date, %window, tz = tz.name(), "scheduling request");
    Ok(ScheduleRequest::new(begin_date, end_date, window, tz)?)
}

fn resolve_timezone(name: Option<&str>) -> Result<Tz> {
    match name {
        Some(name) => Ok(parse_timezone(name)?),
        None => Ok(chrono_tz::UTC),
    }
}

/// Free slots grouped under a header per day.
fn render_text(free: &[TimeBlock]) -> String {
    if free.is_empty() {
        return "No free time in the requested range.".to_string();
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<&TimeBlock>> = BTreeMap::new();
    for block in free {
        by_day.entry(block.start().date_naive()).or_default().push(block);
    }

    let mut lines = Vec::new();
    for (date, blocks) in by_day {
        lines.push(format::format_date(date));
        for block in blocks {
            lines.push(format!("  {}", format::format_slot(block)));
        }
    }
    lines.join("\n")
}

fn read_request_file(path: Option<&str>) -> Result<RequestFile> {
    let raw = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    if raw.trim().is_empty() {
        return Ok(RequestFile::default());
    }
    serde_json::from_str(&raw).context("Failed to parse request JSON")
}
