//! Core composer functionality
//!
//! The synchronous state machine and its building blocks. Nothing in here
//! awaits; suggestion lookups leave as actions and come back as outcomes.

pub mod candidate;
pub mod composer;
pub mod keycode;
pub mod state;
