pub mod busy;

pub use busy::*;
