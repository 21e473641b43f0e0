use crate::config::Query;
use crate::ticket::{Ticket, TicketSet};
use crate::time::UtcOffset;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::Strategy;
use std::sync::Arc;

pub const VVO: &str = "Владивосток";
pub const TLV: &str = "Тель-Авив";

pub fn offset(s: &str) -> UtcOffset {
    s.parse().unwrap()
}

pub fn query(departure_offset: &str, arrival_offset: &str) -> Query {
    Query::new(VVO, TLV, offset(departure_offset), offset(arrival_offset))
}

pub fn add_ticket(
    tickets: &mut Vec<Ticket>,
    origin_name: &str,
    destination_name: &str,
    departure: (&str, &str),
    arrival: (&str, &str),
) {
    tickets.push(Ticket {
        origin: code(origin_name),
        origin_name: Arc::from(origin_name),
        destination: code(destination_name),
        destination_name: Arc::from(destination_name),
        departure_date: departure.0.to_string(),
        departure_time: departure.1.to_string(),
        arrival_date: arrival.0.to_string(),
        arrival_time: arrival.1.to_string(),
        carrier: Arc::from("TK"),
        stops: 0,
        price: 10000,
    });
}

/// A route ticket leaving 01.02.24 at 8:00 and landing `minutes` later on the
/// same clock.
pub fn add_flight_of(tickets: &mut Vec<Ticket>, minutes: i64) {
    let departure = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let arrival = departure + Duration::minutes(minutes);
    let (dep_date, dep_time) = split(departure);
    let (arr_date, arr_time) = split(arrival);
    add_ticket(tickets, VVO, TLV, (&dep_date, &dep_time), (&arr_date, &arr_time));
}

pub fn set_of(minutes: &[i64]) -> TicketSet {
    let mut tickets = Vec::new();
    minutes.iter().for_each(|m| add_flight_of(&mut tickets, *m));
    TicketSet::new(tickets)
}

fn code(name: &str) -> Arc<str> {
    Arc::from(name.chars().take(3).collect::<String>().to_uppercase())
}

fn split(at: NaiveDateTime) -> (String, String) {
    (at.format("%d.%m.%y").to_string(), at.format("%-H:%M").to_string())
}

pub fn arb_flight_time() -> impl Strategy<Value = i64> {
    0..3000i64
}
