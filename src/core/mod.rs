pub mod engine;
pub mod resolver;
pub mod standardize;

pub use crate::domain::model::{Identifier, LookupKey, Resolution, ResolveOptions};
pub use crate::domain::ports::{ConfigProvider, LocalIndex, RemoteResolver};
pub use crate::utils::error::Result;
