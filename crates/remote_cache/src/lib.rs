//! Best-effort provisioning of the remote build-cache settings file.

pub mod error;
pub mod runner;
pub mod setup;

pub use error::RemoteCacheError;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
pub use setup::{setup_remote_cache, RemoteCacheConfig, SetupOutcome, SkipReason};
