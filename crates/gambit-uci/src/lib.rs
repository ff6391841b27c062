//! UCI protocol handling for gambit.

pub mod command;
pub mod engine;
pub mod error;
pub mod external;

pub use command::{GoParams, UciOption};
pub use engine::{EngineConfig, UciEngine};
pub use error::{ExternalEngineError, UciError};
pub use external::ExternalEngine;
