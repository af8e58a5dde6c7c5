pub mod config;
pub mod core;
pub mod domain;
pub mod index;
pub mod remote;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::Settings;
pub use core::{engine::ResolverEngine, resolver::Resolver};
pub use domain::model::{Identifier, LookupKey, Resolution, ResolveOptions};
pub use index::NameNumberIndex;
pub use remote::QuaeroClient;
pub use utils::error::{Result, RocksError};
