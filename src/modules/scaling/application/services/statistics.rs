use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::modules::scaling::application::domain::entities::Unit;

pub const UNIT_BUCKETS: [&str; 4] = ["started", "pending", "error", "unknown"];
pub const TASK_BUCKETS: [&str; 3] = ["pending", "progress", "success"];

/// Bounded time series of one (environment, service) pair: planned units,
/// unit-state distribution and task-status counters per sample. Serialized
/// to a single JSON file and reloaded on startup, truncated to the ring
/// length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatistics {
    pub environment: String,
    pub service: String,
    maxlen: usize,
    #[serde(default)]
    pub time: VecDeque<String>,
    #[serde(default)]
    pub units_planned: VecDeque<Option<u32>>,
    #[serde(default)]
    pub units_current: BTreeMap<String, VecDeque<u32>>,
    #[serde(default)]
    pub tasks_current: BTreeMap<String, VecDeque<u32>>,
}

impl ServiceStatistics {
    pub fn new(environment: &str, service: &str, maxlen: usize) -> Self {
        Self {
            environment: environment.to_string(),
            service: service.to_string(),
            maxlen: maxlen.max(1),
            time: VecDeque::new(),
            units_planned: VecDeque::new(),
            units_current: UNIT_BUCKETS
                .iter()
                .map(|bucket| (bucket.to_string(), VecDeque::new()))
                .collect(),
            tasks_current: TASK_BUCKETS
                .iter()
                .map(|bucket| (bucket.to_string(), VecDeque::new()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Record one sample.
    pub fn update(
        &mut self,
        now: &str,
        planned: Option<u32>,
        units: &BTreeMap<u32, Unit>,
        tasks: &BTreeMap<String, u32>,
    ) {
        let maxlen = self.maxlen;
        push_bounded(&mut self.time, now.to_string(), maxlen);
        push_bounded(&mut self.units_planned, planned, maxlen);
        for bucket in UNIT_BUCKETS {
            let count = units
                .values()
                .filter(|unit| unit.state.bucket() == bucket)
                .count() as u32;
            let series = self.units_current.entry(bucket.to_string()).or_default();
            push_bounded(series, count, maxlen);
        }
        for bucket in TASK_BUCKETS {
            let count = tasks.get(bucket).copied().unwrap_or(0);
            let series = self.tasks_current.entry(bucket.to_string()).or_default();
            push_bounded(series, count, maxlen);
        }
    }

    pub fn file_path(directory: &Path, environment: &str, service: &str) -> PathBuf {
        directory.join(format!("{environment}_{service}.json"))
    }

    /// Load the persisted series, falling back to an empty one on any
    /// problem (a corrupt statistics file must never block the observer).
    pub fn read_or_default(path: &Path, environment: &str, service: &str, maxlen: usize) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Self>(&raw) {
                Ok(mut statistics) => {
                    statistics.maxlen = maxlen.max(1);
                    statistics.truncate();
                    statistics
                }
                Err(error) => {
                    warn!(?path, %error, "Unreadable statistics file, starting fresh");
                    Self::new(environment, service, maxlen)
                }
            },
            Err(_) => Self::new(environment, service, maxlen),
        }
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(self)?;
        std::fs::write(path, raw)
    }

    fn truncate(&mut self) {
        while self.time.len() > self.maxlen {
            self.time.pop_front();
        }
        while self.units_planned.len() > self.maxlen {
            self.units_planned.pop_front();
        }
        for series in self.units_current.values_mut() {
            while series.len() > self.maxlen {
                series.pop_front();
            }
        }
        for series in self.tasks_current.values_mut() {
            while series.len() > self.maxlen {
                series.pop_front();
            }
        }
    }
}

fn push_bounded<T>(series: &mut VecDeque<T>, value: T, maxlen: usize) {
    if series.len() >= maxlen {
        series.pop_front();
    }
    series.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::scaling::application::domain::entities::UnitState;

    fn units(states: &[UnitState]) -> BTreeMap<u32, Unit> {
        states
            .iter()
            .enumerate()
            .map(|(number, state)| {
                (
                    number as u32,
                    Unit {
                        number: number as u32,
                        state: *state,
                        public_address: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn samples_bucket_unit_states() {
        let mut statistics = ServiceStatistics::new("default", "transform", 10);
        statistics.update(
            "2013-09-13 10:00",
            Some(3),
            &units(&[UnitState::Started, UnitState::Pending, UnitState::Error]),
            &BTreeMap::from([("progress".to_string(), 2)]),
        );
        assert_eq!(statistics.len(), 1);
        assert_eq!(statistics.units_current["started"], VecDeque::from([1]));
        assert_eq!(statistics.units_current["pending"], VecDeque::from([1]));
        assert_eq!(statistics.units_current["error"], VecDeque::from([1]));
        assert_eq!(statistics.tasks_current["progress"], VecDeque::from([2]));
        assert_eq!(statistics.tasks_current["pending"], VecDeque::from([0]));
    }

    #[test]
    fn the_ring_is_bounded() {
        let mut statistics = ServiceStatistics::new("default", "transform", 3);
        for i in 0..5 {
            statistics.update(&format!("t{i}"), Some(i), &BTreeMap::new(), &BTreeMap::new());
        }
        assert_eq!(statistics.len(), 3);
        assert_eq!(statistics.time.front().map(String::as_str), Some("t2"));
        assert_eq!(statistics.units_planned, VecDeque::from([Some(2), Some(3), Some(4)]));
    }

    #[test]
    fn write_then_read_round_trip() {
        let directory = std::env::temp_dir().join(format!("orchestra-stats-{}", uuid::Uuid::new_v4()));
        let path = ServiceStatistics::file_path(&directory, "default", "transform");
        let mut statistics = ServiceStatistics::new("default", "transform", 5);
        statistics.update("t0", Some(1), &BTreeMap::new(), &BTreeMap::new());
        statistics.write(&path).unwrap();

        let reloaded = ServiceStatistics::read_or_default(&path, "default", "transform", 5);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.environment, "default");
        std::fs::remove_dir_all(&directory).ok();
    }

    #[test]
    fn unreadable_files_start_fresh() {
        let path = std::env::temp_dir().join(format!("orchestra-bad-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "{not json").unwrap();
        let statistics = ServiceStatistics::read_or_default(&path, "default", "transform", 5);
        assert!(statistics.is_empty());
        std::fs::remove_file(&path).ok();
    }
}
