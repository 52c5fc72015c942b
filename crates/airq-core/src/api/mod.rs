//! AirqApi method implementations, split by concern.

mod builder;
mod dashboard;
mod status;

pub use builder::AirqApiBuilder;
pub(crate) use builder::assemble;
