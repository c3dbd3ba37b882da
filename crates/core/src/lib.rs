//! Domain vocabulary shared by the service crates.

pub mod domain;

pub use domain::*;
