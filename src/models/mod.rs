pub mod catalog;
pub mod common;
pub mod generation;

pub use catalog::*;
pub use common::*;
pub use generation::*;
