use std::collections::{BTreeMap, HashMap};

use crate::config::EnvironmentEvents;
use crate::shared::error::ApiError;

/// Desired unit counts per service over a 24-hour cycle. The table is
/// piecewise constant: a query resolves to the latest entry whose hour is
/// not after the query hour, wrapping to the previous day's last entry.
#[derive(Debug, Clone, Default)]
pub struct EventsTable {
    entries: BTreeMap<u8, HashMap<String, u32>>,
}

impl EventsTable {
    pub fn new(entries: BTreeMap<u8, HashMap<String, u32>>) -> Result<Self, ApiError> {
        if let Some(hour) = entries.keys().find(|hour| **hour > 23) {
            return Err(ApiError::invalid(format!(
                "Event table hour {hour} is outside the day."
            )));
        }
        Ok(Self { entries })
    }

    /// Parse the JSON shape of the configuration file, hours as string keys.
    pub fn from_raw(raw: &EnvironmentEvents) -> Result<Self, ApiError> {
        let mut entries = BTreeMap::new();
        for (hour, services) in raw {
            let hour: u8 = hour
                .parse()
                .map_err(|_| ApiError::invalid(format!("Bad event table hour {hour}.")))?;
            entries.insert(hour, services.clone());
        }
        Self::new(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, hour: u8) -> Option<&HashMap<String, u32>> {
        self.entries
            .range(..=hour)
            .next_back()
            .or_else(|| self.entries.iter().next_back())
            .map(|(_, services)| services)
    }

    pub fn desired(&self, hour: u8, service: &str) -> Option<u32> {
        self.lookup(hour).and_then(|services| services.get(service).copied())
    }
}
