pub mod overlays;
pub mod state;
pub mod store;

pub use overlays::*;
pub use state::*;
pub use store::*;
