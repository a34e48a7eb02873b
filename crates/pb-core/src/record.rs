//! Prediction rows and tables as loaded from the upstream dataset.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{CoreError, CoreResult};

/// Identifier of one subject in the prediction dataset (a ticker, usually).
pub type EntityKey = String;

/// Time axis value. Date-only inputs are stored at midnight.
pub type Timestamp = NaiveDateTime;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a timestamp cell. Accepts RFC 3339, common datetime layouts and
/// plain dates.
pub fn parse_timestamp(value: &str) -> CoreResult<Timestamp> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }

    Err(CoreError::InvalidTimestamp {
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionRecord {
    pub entity_key: EntityKey,
    pub timestamp: Timestamp,
    /// `NaN` when the source cell was blank.
    pub actual_value: f64,
    pub predicted_value: f64,
}

impl PredictionRecord {
    pub fn new(
        entity_key: impl Into<EntityKey>,
        timestamp: Timestamp,
        actual_value: f64,
        predicted_value: f64,
    ) -> Self {
        Self {
            entity_key: entity_key.into(),
            timestamp,
            actual_value,
            predicted_value,
        }
    }
}

/// Ordered rows exactly as the loader produced them.
///
/// The table never re-sorts or deduplicates; row order is presentation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionTable {
    records: Vec<PredictionRecord>,
}

impl PredictionTable {
    pub fn new(records: Vec<PredictionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PredictionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.iter().any(|r| r.entity_key == key)
    }

    pub fn count_key(&self, key: &str) -> usize {
        self.records.iter().filter(|r| r.entity_key == key).count()
    }
}

impl FromIterator<PredictionRecord> for PredictionTable {
    fn from_iter<I: IntoIterator<Item = PredictionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PredictionTable {
    type Item = &'a PredictionRecord;
    type IntoIter = std::slice::Iter<'a, PredictionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Rows of one entity, borrowed from the table for a single render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSeries<'a> {
    key: EntityKey,
    rows: Vec<&'a PredictionRecord>,
}

impl<'a> FilteredSeries<'a> {
    pub(crate) fn new(key: EntityKey, rows: Vec<&'a PredictionRecord>) -> Self {
        Self { key, rows }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rows(&self) -> &[&'a PredictionRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
