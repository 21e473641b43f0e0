use crate::error::{Result, TicketError};
use crate::time::{Minutes, UtcOffset, parse_local};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tabled::Tabled;
use tracing::debug;

pub type AirportCode = Arc<str>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    pub origin: AirportCode,
    pub origin_name: Arc<str>,
    pub destination: AirportCode,
    pub destination_name: Arc<str>,
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub carrier: Arc<str>,
    pub stops: u32,
    pub price: u32,
}

impl Ticket {
    pub fn serves(&self, origin_name: &str, destination_name: &str) -> bool {
        *self.origin_name == *origin_name && *self.destination_name == *destination_name
    }

    pub fn departure(&self, offset: UtcOffset) -> Result<DateTime<FixedOffset>> {
        parse_local(&self.departure_date, &self.departure_time, offset)
    }

    pub fn arrival(&self, offset: UtcOffset) -> Result<DateTime<FixedOffset>> {
        parse_local(&self.arrival_date, &self.arrival_time, offset)
    }

    /// Elapsed minutes from takeoff to landing, each leg read in its own zone.
    pub fn flight_time(&self, departure_offset: UtcOffset, arrival_offset: UtcOffset) -> Result<Minutes> {
        let departure = self.departure(departure_offset)?;
        let arrival = self.arrival(arrival_offset)?;
        Ok(Minutes::between(&departure, &arrival))
    }
}

/// One line of the `--list` table.
#[derive(Clone, Debug, PartialEq, Tabled)]
pub struct TicketRow {
    #[tabled(rename = "Carrier")]
    pub carrier: Arc<str>,
    #[tabled(rename = "Route")]
    pub route: String,
    #[tabled(rename = "Departure")]
    pub departure: String,
    #[tabled(rename = "Arrival")]
    pub arrival: String,
    #[tabled(rename = "Stops")]
    pub stops: u32,
    #[tabled(rename = "Price")]
    pub price: u32,
    #[tabled(rename = "Flight time")]
    pub flight_time: Minutes,
}

impl TicketRow {
    pub fn new(ticket: &Ticket, flight_time: Minutes) -> TicketRow {
        TicketRow {
            carrier: ticket.carrier.clone(),
            route: format!("{} -> {}", ticket.origin, ticket.destination),
            departure: format!("{} {}", ticket.departure_date, ticket.departure_time),
            arrival: format!("{} {}", ticket.arrival_date, ticket.arrival_time),
            stops: ticket.stops,
            price: ticket.price,
            flight_time,
        }
    }
}

/// Tickets in file order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TicketSet {
    pub tickets: Vec<Ticket>,
}

impl TicketSet {
    pub fn new(tickets: Vec<Ticket>) -> TicketSet {
        TicketSet { tickets }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| TicketError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_json(&data)?;
        debug!(path = %path.display(), count = set.len(), "loaded tickets");
        Ok(set)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn route<'a>(&'a self, origin_name: &'a str, destination_name: &'a str) -> impl Iterator<Item = &'a Ticket> + 'a {
        self.tickets
            .iter()
            .filter(move |t| t.serves(origin_name, destination_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "tickets": [
            {
                "origin": "VVO",
                "origin_name": "Владивосток",
                "destination": "TLV",
                "destination_name": "Тель-Авив",
                "departure_date": "12.05.18",
                "departure_time": "16:20",
                "arrival_date": "12.05.18",
                "arrival_time": "22:10",
                "carrier": "TK",
                "stops": 3,
                "price": 12400
            },
            {
                "origin": "LRN",
                "origin_name": "Ларнака",
                "destination": "TLV",
                "destination_name": "Тель-Авив",
                "departure_date": "12.05.18",
                "departure_time": "12:50",
                "arrival_date": "12.05.18",
                "arrival_time": "14:30",
                "carrier": "SU",
                "stops": 1,
                "price": 7000
            }
        ]
    }"#;

    fn offset(s: &str) -> UtcOffset {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_document() {
        let set = TicketSet::from_json(DOCUMENT).unwrap();
        assert_eq!(2, set.len());
        let first = &set.tickets[0];
        assert_eq!("VVO", &*first.origin);
        assert_eq!("Тель-Авив", &*first.destination_name);
        assert_eq!("16:20", first.departure_time);
        assert_eq!(3, first.stops);
        assert_eq!(12400, first.price);
    }

    #[test]
    fn test_route_filter_is_exact() {
        let set = TicketSet::from_json(DOCUMENT).unwrap();
        assert_eq!(1, set.route("Владивосток", "Тель-Авив").count());
        assert_eq!(0, set.route("владивосток", "Тель-Авив").count());
        assert_eq!(0, set.route("Тель-Авив", "Владивосток").count());
        assert_eq!(0, set.route("Владивосток ", "Тель-Авив").count());
    }

    #[test]
    fn test_flight_time_across_zones() {
        let set = TicketSet::from_json(DOCUMENT).unwrap();
        // 16:20+10 is 06:20Z, 22:10+3 is 19:10Z
        let minutes = set.tickets[0].flight_time(offset("UTC+10"), offset("UTC+3")).unwrap();
        assert_eq!(Minutes(12 * 60 + 50), minutes);
    }

    #[test]
    fn test_flight_time_same_zone_is_wall_clock() {
        let set = TicketSet::from_json(DOCUMENT).unwrap();
        let minutes = set.tickets[1].flight_time(offset("UTC+3"), offset("UTC+3")).unwrap();
        assert_eq!(Minutes(100), minutes);
    }

    #[test]
    fn test_flight_time_reports_bad_dates() {
        let mut ticket = TicketSet::from_json(DOCUMENT).unwrap().tickets.remove(0);
        ticket.arrival_date = "2018-05-12".to_string();
        let err = ticket.flight_time(UtcOffset::utc(), UtcOffset::utc()).unwrap_err();
        assert!(matches!(err, TicketError::InvalidFormat { .. }));
    }

    #[test]
    fn test_negative_stops_rejected() {
        let doc = DOCUMENT.replace("\"stops\": 3", "\"stops\": -3");
        assert!(matches!(TicketSet::from_json(&doc), Err(TicketError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        let set = TicketSet::load_from_file(file.path()).unwrap();
        assert_eq!(TicketSet::from_json(DOCUMENT).unwrap(), set);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        match TicketSet::load_from_file(&path) {
            Err(TicketError::Load { path: reported, .. }) => assert_eq!(path, reported),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn test_row_rendering() {
        let set = TicketSet::from_json(DOCUMENT).unwrap();
        let row = TicketRow::new(&set.tickets[1], Minutes(100));
        assert_eq!("LRN -> TLV", row.route);
        assert_eq!("12.05.18 12:50", row.departure);
        let table = tabled::Table::new([row]).to_string();
        assert!(table.contains("01 hours 40 minutes"));
        assert!(table.contains("Flight time"));
    }
}
