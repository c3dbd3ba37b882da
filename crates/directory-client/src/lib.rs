pub mod config;
pub mod graph;
pub mod token;

pub use config::{ClientCredentials, DirectoryConfig};
pub use graph::GraphDirectory;
pub use token::{AccessToken, TokenIssuer};
