//! Data models shared by the library and the RPC layer.

mod pollutant;
mod report;
mod responses;
mod selection;

pub use pollutant::*;
pub use report::*;
pub use responses::*;
pub use selection::*;
