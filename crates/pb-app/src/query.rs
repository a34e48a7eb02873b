//! Query helpers over aligned charts and loaded tables.

use std::io::Write;

use chrono::Timelike;

use pb_core::{ChartSpec, PredictionTable, Timestamp};

use crate::error::{AppError, AppResult};

/// Summary of one aligned actual/predicted pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub key: String,
    pub point_count: usize,
    /// Points where both values are present; deviations cover only these.
    pub compared_count: usize,
    pub time_range: (Timestamp, Timestamp),
    pub mean_abs_deviation: f64,
    pub rms_deviation: f64,
    pub max_abs_deviation: f64,
}

/// Summarize the gap between predicted and actual values.
///
/// Points with a blank (`NaN`) value are skipped. With nothing to compare the
/// deviations are `NaN`.
pub fn summarize_chart(chart: &ChartSpec) -> AppResult<SeriesSummary> {
    let Some(time_range) = chart.time_range() else {
        return Err(AppError::EmptySeries {
            key: chart.labels().title.clone(),
        });
    };

    let mut compared = 0_usize;
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut max_abs: f64 = 0.0;
    for (_, actual, predicted) in chart.points() {
        if actual.is_nan() || predicted.is_nan() {
            continue;
        }
        let diff = (predicted - actual).abs();
        compared += 1;
        abs_sum += diff;
        sq_sum += diff * diff;
        max_abs = max_abs.max(diff);
    }

    let (mean_abs_deviation, rms_deviation, max_abs_deviation) = if compared == 0 {
        (f64::NAN, f64::NAN, f64::NAN)
    } else {
        let n = compared as f64;
        (abs_sum / n, (sq_sum / n).sqrt(), max_abs)
    };

    Ok(SeriesSummary {
        key: chart.labels().title.clone(),
        point_count: chart.len(),
        compared_count: compared,
        time_range,
        mean_abs_deviation,
        rms_deviation,
        max_abs_deviation,
    })
}

/// Distinct entity keys, sorted for display.
pub fn list_entity_keys(table: &PredictionTable) -> Vec<String> {
    pb_core::distinct_keys(table).into_iter().collect()
}

/// Write `date,actual,predicted` rows in chart order. Gaps are written as
/// empty cells.
pub fn write_chart_csv<W: Write>(chart: &ChartSpec, out: W) -> AppResult<usize> {
    let labels = chart.labels();
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record([
            labels.x_label.as_str(),
            labels.actual_name.as_str(),
            labels.predicted_name.as_str(),
        ])
        .map_err(csv_error)?;

    for (t, actual, predicted) in chart.points() {
        writer
            .write_record([
                format_timestamp(t),
                format_value(actual),
                format_value(predicted),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(chart.len())
}

/// Dates without a time of day print as plain dates.
pub fn format_timestamp(t: Timestamp) -> String {
    if t.num_seconds_from_midnight() == 0 && t.nanosecond() == 0 {
        t.date().to_string()
    } else {
        t.to_string()
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::Render {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_core::{PredictionRecord, align, filter, parse_timestamp};

    fn chart() -> ChartSpec {
        let table = PredictionTable::new(vec![
            PredictionRecord::new("AAA", parse_timestamp("2024-01-01").unwrap(), 10.0, 11.0),
            PredictionRecord::new("AAA", parse_timestamp("2024-01-02").unwrap(), 12.0, 11.5),
        ]);
        align(&filter(&table, "AAA").unwrap()).unwrap()
    }

    #[test]
    fn summary_of_reference_series() {
        let summary = summarize_chart(&chart()).unwrap();
        assert_eq!(summary.key, "AAA");
        assert_eq!(summary.point_count, 2);
        assert_eq!(summary.compared_count, 2);
        assert!((summary.mean_abs_deviation - 0.75).abs() < 1e-12);
        assert!((summary.max_abs_deviation - 1.0).abs() < 1e-12);
        let expected_rms = ((1.0 + 0.25) / 2.0_f64).sqrt();
        assert!((summary.rms_deviation - expected_rms).abs() < 1e-12);
    }

    #[test]
    fn csv_export_in_row_order() {
        let mut buf = Vec::new();
        let n = write_chart_csv(&chart(), &mut buf).unwrap();
        assert_eq!(n, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Date,Actual,Predicted\n2024-01-01,10,11\n2024-01-02,12,11.5\n"
        );
    }

    fn chart_with_gaps() -> ChartSpec {
        let table = PredictionTable::new(vec![
            PredictionRecord::new("AAA", parse_timestamp("2024-01-01").unwrap(), 10.0, f64::NAN),
            PredictionRecord::new("AAA", parse_timestamp("2024-01-02").unwrap(), 12.0, 11.5),
            PredictionRecord::new("AAA", parse_timestamp("2024-01-03").unwrap(), f64::NAN, 13.0),
        ]);
        align(&filter(&table, "AAA").unwrap()).unwrap()
    }

    #[test]
    fn summary_skips_blank_values() {
        let summary = summarize_chart(&chart_with_gaps()).unwrap();
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.compared_count, 1);
        assert!((summary.mean_abs_deviation - 0.5).abs() < 1e-12);
        assert!((summary.max_abs_deviation - 0.5).abs() < 1e-12);
    }

    #[test]
    fn summary_without_comparable_points() {
        let table = PredictionTable::new(vec![PredictionRecord::new(
            "AAA",
            parse_timestamp("2024-01-01").unwrap(),
            10.0,
            f64::NAN,
        )]);
        let chart = align(&filter(&table, "AAA").unwrap()).unwrap();
        let summary = summarize_chart(&chart).unwrap();
        assert_eq!(summary.compared_count, 0);
        assert!(summary.mean_abs_deviation.is_nan());
    }

    #[test]
    fn csv_export_writes_gaps_as_empty_cells() {
        let mut buf = Vec::new();
        write_chart_csv(&chart_with_gaps(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Date,Actual,Predicted\n2024-01-01,10,\n2024-01-02,12,11.5\n2024-01-03,,13\n"
        );
    }

    #[test]
    fn timestamp_with_time_keeps_time() {
        let t = parse_timestamp("2024-01-01 09:30:00").unwrap();
        assert_eq!(format_timestamp(t), "2024-01-01 09:30:00");
    }
}
