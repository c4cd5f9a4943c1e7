pub mod cli;
mod error;
pub mod logger;
mod materializer;
mod output;
mod response;

pub use error::{ErrorKind, Result, SpongeError};
pub use materializer::{execute, materialize};
pub use output::{
    DEFAULT_BUNDLE_PATH, DEFAULT_CA_CHAIN_PATH, Destination, NON_SENSITIVE_FILE_MODE,
    OutputConfig, SENSITIVE_FILE_MODE, exists, write_guarded,
};
pub use response::{IssuanceData, IssuanceResponse};
