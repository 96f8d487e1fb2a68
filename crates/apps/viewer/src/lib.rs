//! Itinerary viewer session: the view-state store wired to the map camera,
//! plus the configuration and event script used by the `itinerary-viewer`
//! binary.

pub mod config;
pub mod report;
pub mod script;
pub mod session;

pub use config::*;
pub use report::*;
pub use script::*;
pub use session::*;
