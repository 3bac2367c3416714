//! Game rules: victory patterns and board analysis.
//!
//! Rules are pure evaluators over a board snapshot, separated from board
//! storage so strategies can compose them without touching live state.

mod victory;

pub use victory::{BoardControl, Line, LineKind, VictoryConditions, VictoryPattern};
