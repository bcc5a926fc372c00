//! Controller layer: error classification for the status banner and dispatch
//! of queued form messages into the form controller and record store.

pub mod events;
pub mod orchestration;
