pub mod board;
pub mod common;
pub mod turn;
pub mod unit;

// Re-export common types
pub use common::{Side, UnitId};

// Re-export board index types
pub use board::{Board, BoardDimensions};

// Re-export turn state
pub use turn::{TurnPhase, TurnState};

// Re-export unit types
pub use unit::{TurnFlags, Unit, UnitPhase, UnitStats};
