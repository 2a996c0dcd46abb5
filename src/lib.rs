// Game core: phrase bank, difficulty engine and the session/round state machines.
// The terminal front-end in main.rs only drives these through SessionController.

pub mod config;
pub mod engine;
pub mod error;
pub mod phrase;
pub mod session;

pub use error::GameError;
pub use session::controller::{Phase, SessionController, Snapshot};
