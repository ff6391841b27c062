//! Search and evaluation for gambit.

pub mod eval;
pub mod search;
pub mod time;

pub use eval::{MATE, evaluate, static_eval};
pub use search::control::SearchControl;
pub use search::{Origin, SearchConfig, SearchResult, SearchStatus, Searcher};
pub use time::budget_from_go;
