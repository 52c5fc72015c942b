//! Analyses behind each dashboard section.
//!
//! Every function here is pure: it takes an already-filtered [`Dataset`]
//! and returns chart-ready data from [`crate::models`].
//!
//! [`Dataset`]: crate::dataset::Dataset

pub mod alerts;
pub mod comparison;
pub mod correlation;
pub mod palette;
pub mod smoothing;
pub mod summary;
pub mod thresholds;
pub mod trend;

pub use alerts::evaluate_alerts;
pub use comparison::comparison_chart;
pub use correlation::correlation_matrix;
pub use smoothing::{smooth, SmoothingMethod, SmoothingWindow};
pub use summary::summarize;
pub use thresholds::Thresholds;
pub use trend::trend_chart;
