//! UCI protocol errors.

use std::time::Duration;

use gambit_core::{FenError, MoveNotationError};

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN \"{fen}\": {source}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        /// Why it was rejected.
        source: FenError,
    },

    /// A move string in the `position` command could not be applied.
    #[error("invalid move {uci_move}: {source}")]
    InvalidMove {
        /// The UCI move string that failed to parse.
        uci_move: String,
        /// Why it was rejected.
        source: MoveNotationError,
    },

    /// A `go` parameter was given without a value.
    #[error("missing value for go parameter {param}")]
    MissingGoValue {
        /// The parameter name.
        param: String,
    },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue {
        /// The parameter name.
        param: String,
        /// The rejected value.
        value: String,
    },

    /// A `setoption` line without `name`.
    #[error("malformed setoption command")]
    MalformedOption,

    /// `setoption` named an option this engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// An option value could not be parsed.
    #[error("invalid value for option {name}: {value}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Failures of the external engine collaborator. All of them are
/// recoverable: the caller falls back to its own search.
#[derive(Debug, thiserror::Error)]
pub enum ExternalEngineError {
    /// The engine process could not be started.
    #[error("failed to start external engine {program}: {source}")]
    Spawn {
        /// The program that was launched.
        program: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// The process did not expose a stdin or stdout pipe.
    #[error("external engine pipes unavailable")]
    MissingPipe,

    /// Writing to the engine failed.
    #[error("external engine I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// No expected reply arrived within the allowed time.
    #[error("external engine did not answer \"{expected}\" within {waited:?}")]
    Timeout {
        /// The reply being waited for.
        expected: &'static str,
        /// How long we waited.
        waited: Duration,
    },

    /// The engine's output closed.
    #[error("external engine exited")]
    Disconnected,

    /// `bestmove` carried no move.
    #[error("external engine returned no move")]
    NoBestMove,

    /// The returned move is not legal in the current position.
    #[error("external engine returned illegal move {uci_move}")]
    IllegalMove {
        /// The move text as returned.
        uci_move: String,
    },
}
