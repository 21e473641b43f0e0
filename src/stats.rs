use crate::config::{MalformedPolicy, Query};
use crate::error::{Result, TicketError};
use crate::ticket::{Ticket, TicketRow, TicketSet};
use crate::time::Minutes;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Value(Minutes),
    /// Nothing in the data set flies the requested route.
    NoTickets,
}

impl Outcome {
    pub fn value(&self) -> Option<Minutes> {
        match self {
            Outcome::Value(m) => Some(*m),
            Outcome::NoTickets => None,
        }
    }
}

/// Flight times of the tickets serving a route, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Durations {
    pub values: Vec<Minutes>,
    /// Records left out under [`MalformedPolicy::Skip`].
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightStats {
    pub average: Outcome,
    pub percentile: Outcome,
    pub skipped: usize,
}

fn collect_route<T>(
    tickets: &TicketSet,
    query: &Query,
    mut map: impl FnMut(&Ticket, Minutes) -> T,
) -> Result<(Vec<T>, usize)> {
    let mut collected = vec![];
    let mut skipped = 0;
    for ticket in tickets.route(&query.origin_name, &query.destination_name) {
        match ticket.flight_time(query.departure_offset, query.arrival_offset) {
            Ok(minutes) => {
                if minutes.is_negative() {
                    warn!(carrier = %ticket.carrier, %minutes, "ticket lands before it departs");
                }
                collected.push(map(ticket, minutes));
            }
            Err(err @ TicketError::InvalidFormat { .. }) if query.on_malformed == MalformedPolicy::Skip => {
                debug!(carrier = %ticket.carrier, error = %err, "skipping malformed ticket");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok((collected, skipped))
}

pub fn durations(tickets: &TicketSet, query: &Query) -> Result<Durations> {
    let (values, skipped) = collect_route(tickets, query, |_, minutes| minutes)?;
    Ok(Durations { values, skipped })
}

/// Arithmetic mean truncated to whole minutes.
pub fn mean(values: &[Minutes]) -> Outcome {
    if values.is_empty() {
        return Outcome::NoTickets;
    }
    let total: Minutes = values.iter().copied().sum();
    Outcome::Value(Minutes((total.0 as f64 / values.len() as f64) as i64))
}

/// Nearest-rank percentile of an ascending slice. The rank is clamped into the
/// slice, so 0 picks the first value and 100 the last.
pub fn nearest_rank(sorted: &[Minutes], percentile: u8) -> Outcome {
    if sorted.is_empty() {
        return Outcome::NoTickets;
    }
    let rank = (percentile as f64 / 100.0 * sorted.len() as f64).round() as i64 - 1;
    let index = rank.clamp(0, sorted.len() as i64 - 1) as usize;
    Outcome::Value(sorted[index])
}

pub fn average(tickets: &TicketSet, query: &Query) -> Result<Outcome> {
    let durations = durations(tickets, query)?;
    Ok(mean(&durations.values))
}

pub fn percentile(tickets: &TicketSet, query: &Query) -> Result<Outcome> {
    let mut durations = durations(tickets, query)?;
    durations.values.sort();
    Ok(nearest_rank(&durations.values, query.percentile))
}

fn stats_of(mut values: Vec<Minutes>, skipped: usize, percentile: u8) -> FlightStats {
    values.sort();
    debug!(matched = values.len(), skipped, "collected flight times");
    FlightStats {
        average: mean(&values),
        percentile: nearest_rank(&values, percentile),
        skipped,
    }
}

/// Average and percentile from a single pass over the tickets.
pub fn summarize(tickets: &TicketSet, query: &Query) -> Result<FlightStats> {
    let Durations { values, skipped } = durations(tickets, query)?;
    Ok(stats_of(values, skipped, query.percentile))
}

/// Like [`summarize`], also keeping a table row per ticket from the same pass.
pub fn summarize_with_rows(tickets: &TicketSet, query: &Query) -> Result<(FlightStats, Vec<TicketRow>)> {
    let (rows, skipped) = collect_route(tickets, query, TicketRow::new)?;
    let values = rows.iter().map(|r| r.flight_time).collect();
    Ok((stats_of(values, skipped, query.percentile), rows))
}
