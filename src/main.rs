use clap::Parser;
use colored::Colorize;
use flight_stats::config::{
    DEFAULT_ARRIVAL_OFFSET, DEFAULT_DEPARTURE_OFFSET, DEFAULT_DESTINATION_NAME, DEFAULT_ORIGIN_NAME,
    DEFAULT_PERCENTILE, DEFAULT_TICKETS_PATH, MalformedPolicy, Query,
};
use flight_stats::stats::Outcome;
use flight_stats::ticket::TicketSet;
use flight_stats::time::UtcOffset;
use flight_stats::{logger, stats};
use std::path::PathBuf;
use tabled::settings::Style;
use tracing::{info, warn};

#[derive(Parser)]
#[command(about = "Average and percentile flight time for one route")]
struct Args {
    /// Path to the JSON ticket file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_TICKETS_PATH)]
    tickets: PathBuf,

    /// Origin city as spelled in `origin_name`
    #[arg(long, default_value = DEFAULT_ORIGIN_NAME)]
    origin: String,

    /// Destination city as spelled in `destination_name`
    #[arg(long, default_value = DEFAULT_DESTINATION_NAME)]
    destination: String,

    /// UTC offset of departure times, e.g. UTC+10
    #[arg(long, value_name = "OFFSET", default_value = DEFAULT_DEPARTURE_OFFSET, allow_hyphen_values = true)]
    departure_offset: UtcOffset,

    /// UTC offset of arrival times, e.g. UTC+3
    #[arg(long, value_name = "OFFSET", default_value = DEFAULT_ARRIVAL_OFFSET, allow_hyphen_values = true)]
    arrival_offset: UtcOffset,

    /// Nearest-rank percentile to report
    #[arg(short, long, default_value_t = DEFAULT_PERCENTILE, value_parser = clap::value_parser!(u8).range(0..=100))]
    percentile: u8,

    /// Skip tickets with malformed dates instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Print the matching tickets before the summary
    #[arg(short, long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for Query {
    fn from(args: &Args) -> Self {
        let policy = if args.skip_invalid { MalformedPolicy::Skip } else { MalformedPolicy::Abort };
        Query::new(&args.origin, &args.destination, args.departure_offset, args.arrival_offset)
            .with_percentile(args.percentile)
            .with_policy(policy)
    }
}

fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn no_tickets(query: &Query) -> String {
    format!("No tickets between {} and {}", query.origin_name, query.destination_name)
        .yellow()
        .to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let query = Query::from(&args);
    info!(
        origin = %query.origin_name,
        destination = %query.destination_name,
        departure_offset = %query.departure_offset,
        arrival_offset = %query.arrival_offset,
        "loading tickets from {}",
        args.tickets.display()
    );

    let tickets = TicketSet::load_from_file(&args.tickets)?;
    if tickets.is_empty() {
        warn!("{} holds no tickets", args.tickets.display());
    }
    let (summary, rows) = if args.list {
        stats::summarize_with_rows(&tickets, &query)?
    } else {
        (stats::summarize(&tickets, &query)?, vec![])
    };

    if summary.skipped > 0 {
        warn!("skipped {} malformed tickets", summary.skipped);
    }

    if !rows.is_empty() {
        let mut table = tabled::Table::new(&rows);
        table.with(Style::rounded());
        table.with(tabled::settings::Alignment::left());
        println!("{}", table);
    }

    match summary.average {
        Outcome::Value(minutes) => println!(
            "Average flight time between {} and {} is {}",
            query.origin_name,
            query.destination_name,
            minutes.to_string().bold()
        ),
        Outcome::NoTickets => println!("{}", no_tickets(&query)),
    }
    match summary.percentile {
        Outcome::Value(minutes) => println!(
            "{} percentile of flight time between {} and {} is {}",
            ordinal(query.percentile),
            query.origin_name,
            query.destination_name,
            minutes.to_string().bold()
        ),
        Outcome::NoTickets => println!("{}", no_tickets(&query)),
    }
    Ok(())
}
