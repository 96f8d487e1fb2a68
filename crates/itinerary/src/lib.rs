pub mod dataset;
pub mod error;
pub mod model;
pub mod route;
pub mod summary;

pub use dataset::*;
pub use error::*;
pub use model::*;
pub use route::*;
pub use summary::*;
