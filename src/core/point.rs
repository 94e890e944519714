use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Time series point as it goes into the database.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: BTreeMap<&'static str, String>,
    pub time: DateTime<Utc>,
    pub fields: BTreeMap<&'static str, f64>,
}

impl Point {
    pub fn new(measurement: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            time,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.tags.insert(key, value.into());
        self
    }

    pub fn with_field(mut self, key: &'static str, value: impl Into<f64>) -> Self {
        self.fields.insert(key, value.into());
        self
    }
}
