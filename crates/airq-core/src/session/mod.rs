//! Dashboard sessions.

#[allow(clippy::module_inception)]
mod session;
mod store;

pub use session::AnalysisSession;
pub use store::{SessionHandle, SessionStore};
