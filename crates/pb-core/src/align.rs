//! Actual/predicted alignment on a shared time axis.

use crate::chart::{ChartLabels, ChartSpec};
use crate::error::{CoreError, CoreResult};
use crate::record::FilteredSeries;

/// Align with default labels, titled by the series' entity key.
pub fn align(series: &FilteredSeries<'_>) -> CoreResult<ChartSpec> {
    let labels = ChartLabels::default().with_title(series.key());
    align_with_labels(series, labels)
}

/// Emit timestamps and both value sequences in row order.
///
/// Rows are never sorted, merged or interpolated.
pub fn align_with_labels(series: &FilteredSeries<'_>, labels: ChartLabels) -> CoreResult<ChartSpec> {
    if series.is_empty() {
        return Err(CoreError::EmptySeries {
            key: series.key().to_string(),
        });
    }

    let n = series.len();
    let mut x_axis = Vec::with_capacity(n);
    let mut actual_y = Vec::with_capacity(n);
    let mut predicted_y = Vec::with_capacity(n);

    for row in series.rows() {
        x_axis.push(row.timestamp);
        actual_y.push(row.actual_value);
        predicted_y.push(row.predicted_value);
    }

    Ok(ChartSpec::from_parts(x_axis, actual_y, predicted_y, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use crate::record::{PredictionRecord, PredictionTable, parse_timestamp};

    #[test]
    fn align_reference_scenario() {
        let d1 = parse_timestamp("2024-01-01").unwrap();
        let d2 = parse_timestamp("2024-01-02").unwrap();
        let table = PredictionTable::new(vec![
            PredictionRecord::new("AAA", d1, 10.0, 11.0),
            PredictionRecord::new("AAA", d2, 12.0, 11.5),
            PredictionRecord::new("BBB", d1, 5.0, 5.2),
        ]);

        let chart = align(&filter(&table, "AAA").unwrap()).unwrap();

        assert_eq!(chart.x_axis(), &[d1, d2]);
        assert_eq!(chart.actual_y(), &[10.0, 12.0]);
        assert_eq!(chart.predicted_y(), &[11.0, 11.5]);
        assert_eq!(chart.labels().title, "AAA");
        assert_eq!(chart.labels().actual_name, "Actual");
        assert_eq!(chart.labels().predicted_name, "Predicted");
    }

    #[test]
    fn align_empty_series_fails() {
        let table = PredictionTable::default();
        let series = filter(&table, "AAA").unwrap();
        let err = align(&series).unwrap_err();
        assert_eq!(
            err,
            CoreError::EmptySeries {
                key: "AAA".to_string()
            }
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn align_does_not_sort() {
        let d1 = parse_timestamp("2024-01-01").unwrap();
        let d3 = parse_timestamp("2024-01-03").unwrap();
        let table = PredictionTable::new(vec![
            PredictionRecord::new("AAA", d3, 3.0, 3.1),
            PredictionRecord::new("AAA", d1, 1.0, 1.1),
        ]);

        let chart = align(&filter(&table, "AAA").unwrap()).unwrap();
        assert_eq!(chart.x_axis(), &[d3, d1]);
        assert_eq!(chart.time_range(), Some((d1, d3)));
    }

    #[test]
    fn custom_labels_pass_through() {
        let d1 = parse_timestamp("2024-01-01").unwrap();
        let table = PredictionTable::new(vec![PredictionRecord::new("AAA", d1, 1.0, 1.0)]);
        let labels = ChartLabels::default()
            .with_title("AAA close")
            .with_axes("Day", "USD");

        let chart = align_with_labels(&filter(&table, "AAA").unwrap(), labels).unwrap();
        assert_eq!(chart.labels().x_label, "Day");
        assert_eq!(chart.labels().y_label, "USD");
        assert_eq!(chart.labels().title, "AAA close");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::filter::{distinct_keys, filter};
    use crate::record::{PredictionRecord, PredictionTable, parse_timestamp};
    use chrono::Duration;
    use proptest::prelude::*;

    fn arb_table() -> impl Strategy<Value = PredictionTable> {
        let keys = prop::sample::select(vec!["AAA", "BBB", "CCC", "DDD"]);
        prop::collection::vec((keys, 0_i64..60, -1.0e4_f64..1.0e4, -1.0e4_f64..1.0e4), 0..40)
            .prop_map(|rows| {
                let base = parse_timestamp("2024-01-01").unwrap();
                rows.into_iter()
                    .map(|(k, day, a, p)| {
                        PredictionRecord::new(k, base + Duration::days(day), a, p)
                    })
                    .collect::<PredictionTable>()
            })
    }

    proptest! {
        #[test]
        fn filter_neither_loses_nor_leaks_rows(table in arb_table()) {
            for key in distinct_keys(&table) {
                let series = filter(&table, &key).unwrap();
                prop_assert!(series.rows().iter().all(|r| r.entity_key == key));
                prop_assert_eq!(series.len(), table.count_key(&key));
            }
        }

        #[test]
        fn aligned_lengths_match_series(table in arb_table()) {
            for key in distinct_keys(&table) {
                let series = filter(&table, &key).unwrap();
                let chart = align(&series).unwrap();
                prop_assert_eq!(chart.x_axis().len(), series.len());
                prop_assert_eq!(chart.actual_y().len(), series.len());
                prop_assert_eq!(chart.predicted_y().len(), series.len());
            }
        }

        #[test]
        fn filter_then_align_is_deterministic(table in arb_table()) {
            for key in distinct_keys(&table) {
                let first = align(&filter(&table, &key).unwrap()).unwrap();
                let second = align(&filter(&table, &key).unwrap()).unwrap();
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn absent_key_is_invalid_selection(table in arb_table()) {
            prop_assume!(!table.is_empty());
            let is_invalid = matches!(
                filter(&table, "ZZZ"),
                Err(CoreError::InvalidSelection { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
