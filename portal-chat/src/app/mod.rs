//! Application module
//!
//! - Actions: what can happen
//! - State: what the client currently shows
//! - Reducer: pure function (State, Action) -> State
//!
//! Portal data lives in the service layer. This state only tracks what the
//! line client needs between inputs: pending feedback, the typing
//! indicator and the calendar undo slot.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use state::{AppState, StatusBarState};
