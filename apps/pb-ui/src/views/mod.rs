pub mod benchmark_view;
pub mod prediction_view;

pub use benchmark_view::BenchmarkView;
pub use prediction_view::PredictionView;
