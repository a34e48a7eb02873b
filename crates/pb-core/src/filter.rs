//! Per-entity row selection.

use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};
use crate::record::{EntityKey, FilteredSeries, PredictionTable};

/// Every entity key present in the table, once.
pub fn distinct_keys(table: &PredictionTable) -> BTreeSet<EntityKey> {
    table.iter().map(|r| r.entity_key.clone()).collect()
}

/// Rows of `table` whose entity key equals `key`, in table order.
///
/// An empty table yields an empty series. A non-empty table that has no row
/// for `key` is an invalid selection; there is no fallback key.
pub fn filter<'a>(table: &'a PredictionTable, key: &str) -> CoreResult<FilteredSeries<'a>> {
    let rows: Vec<_> = table.iter().filter(|r| r.entity_key == key).collect();

    if rows.is_empty() && !table.is_empty() {
        return Err(CoreError::InvalidSelection {
            key: key.to_string(),
        });
    }

    Ok(FilteredSeries::new(key.to_string(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PredictionRecord, parse_timestamp};

    fn sample_table() -> PredictionTable {
        let d1 = parse_timestamp("2024-01-01").unwrap();
        let d2 = parse_timestamp("2024-01-02").unwrap();
        PredictionTable::new(vec![
            PredictionRecord::new("AAA", d1, 10.0, 11.0),
            PredictionRecord::new("AAA", d2, 12.0, 11.5),
            PredictionRecord::new("BBB", d1, 5.0, 5.2),
        ])
    }

    #[test]
    fn filter_keeps_matching_rows_in_order() {
        let table = sample_table();
        let series = filter(&table, "AAA").unwrap();

        assert_eq!(series.key(), "AAA");
        assert_eq!(series.len(), 2);
        assert_eq!(series.rows()[0], &table.records()[0]);
        assert_eq!(series.rows()[1], &table.records()[1]);
    }

    #[test]
    fn filter_rejects_absent_key() {
        let table = sample_table();
        let err = filter(&table, "ZZZ").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidSelection {
                key: "ZZZ".to_string()
            }
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn filter_on_empty_table_is_empty_series() {
        let table = PredictionTable::default();
        let series = filter(&table, "AAA").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn filter_is_case_sensitive() {
        let table = sample_table();
        assert!(filter(&table, "aaa").is_err());
    }

    #[test]
    fn filter_keeps_duplicate_timestamps() {
        let d1 = parse_timestamp("2024-01-01").unwrap();
        let table = PredictionTable::new(vec![
            PredictionRecord::new("AAA", d1, 1.0, 1.5),
            PredictionRecord::new("AAA", d1, 2.0, 2.5),
        ]);
        let series = filter(&table, "AAA").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.rows()[0].actual_value, 1.0);
        assert_eq!(series.rows()[1].actual_value, 2.0);
    }

    #[test]
    fn distinct_keys_lists_each_key_once() {
        let keys = distinct_keys(&sample_table());
        let expected: BTreeSet<EntityKey> = ["AAA", "BBB"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn distinct_keys_of_empty_table() {
        assert!(distinct_keys(&PredictionTable::default()).is_empty());
    }
}
