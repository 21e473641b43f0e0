use crate::time::UtcOffset;
use std::sync::Arc;

pub const DEFAULT_TICKETS_PATH: &str = "data/tickets.json";
pub const DEFAULT_ORIGIN_NAME: &str = "Владивосток";
pub const DEFAULT_DESTINATION_NAME: &str = "Тель-Авив";
pub const DEFAULT_DEPARTURE_OFFSET: &str = "UTC+10";
pub const DEFAULT_ARRIVAL_OFFSET: &str = "UTC+3";
pub const DEFAULT_PERCENTILE: u8 = 90;

/// What to do with a ticket whose date or time does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole run on the first bad record.
    #[default]
    Abort,
    /// Leave the record out and count it.
    Skip,
}

/// Route, zones and percentile for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub origin_name: Arc<str>,
    pub destination_name: Arc<str>,
    pub departure_offset: UtcOffset,
    pub arrival_offset: UtcOffset,
    /// Nearest-rank percentile, 0..=100.
    pub percentile: u8,
    pub on_malformed: MalformedPolicy,
}

impl Query {
    pub fn new(
        origin_name: &str,
        destination_name: &str,
        departure_offset: UtcOffset,
        arrival_offset: UtcOffset,
    ) -> Query {
        Query {
            origin_name: Arc::from(origin_name),
            destination_name: Arc::from(destination_name),
            departure_offset,
            arrival_offset,
            percentile: DEFAULT_PERCENTILE,
            on_malformed: MalformedPolicy::Abort,
        }
    }

    pub fn with_percentile(mut self, percentile: u8) -> Query {
        self.percentile = percentile.min(100);
        self
    }

    pub fn with_policy(mut self, on_malformed: MalformedPolicy) -> Query {
        self.on_malformed = on_malformed;
        self
    }
}
