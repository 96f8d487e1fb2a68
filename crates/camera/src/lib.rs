//! Map camera control for the itinerary viewer.
//!
//! The controller drives any widget implementing [`MapAdapter`] through
//! stepped, event-paced zoom animations. At most one animated sequence runs
//! at a time; requests arriving meanwhile are dropped.

pub mod adapter;
pub mod config;
pub mod controller;
pub mod simulated;
pub mod zoom;

pub use adapter::*;
pub use config::*;
pub use controller::*;
pub use simulated::*;
pub use zoom::*;
