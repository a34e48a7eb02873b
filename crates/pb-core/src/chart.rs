//! Render-ready chart bundle.

use crate::record::Timestamp;

pub const DEFAULT_X_LABEL: &str = "Date";
pub const DEFAULT_Y_LABEL: &str = "Price";
pub const ACTUAL_SERIES_NAME: &str = "Actual";
pub const PREDICTED_SERIES_NAME: &str = "Predicted";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub actual_name: String,
    pub predicted_name: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            actual_name: ACTUAL_SERIES_NAME.to_string(),
            predicted_name: PREDICTED_SERIES_NAME.to_string(),
        }
    }
}

impl ChartLabels {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }
}

/// Actual and predicted series on a shared time axis.
///
/// Only built by [`crate::align`]; `x_axis`, `actual_y` and `predicted_y`
/// always have the same length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartSpec {
    x_axis: Vec<Timestamp>,
    actual_y: Vec<f64>,
    predicted_y: Vec<f64>,
    labels: ChartLabels,
}

impl ChartSpec {
    pub(crate) fn from_parts(
        x_axis: Vec<Timestamp>,
        actual_y: Vec<f64>,
        predicted_y: Vec<f64>,
        labels: ChartLabels,
    ) -> Self {
        debug_assert_eq!(x_axis.len(), actual_y.len());
        debug_assert_eq!(x_axis.len(), predicted_y.len());
        Self {
            x_axis,
            actual_y,
            predicted_y,
            labels,
        }
    }

    pub fn x_axis(&self) -> &[Timestamp] {
        &self.x_axis
    }

    pub fn actual_y(&self) -> &[f64] {
        &self.actual_y
    }

    pub fn predicted_y(&self) -> &[f64] {
        &self.predicted_y
    }

    pub fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.x_axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_axis.is_empty()
    }

    /// `(timestamp, actual, predicted)` in row order.
    pub fn points(&self) -> impl Iterator<Item = (Timestamp, f64, f64)> + '_ {
        self.x_axis
            .iter()
            .zip(&self.actual_y)
            .zip(&self.predicted_y)
            .map(|((t, a), p)| (*t, *a, *p))
    }

    pub fn time_range(&self) -> Option<(Timestamp, Timestamp)> {
        let min = self.x_axis.iter().min()?;
        let max = self.x_axis.iter().max()?;
        Some((*min, *max))
    }
}
