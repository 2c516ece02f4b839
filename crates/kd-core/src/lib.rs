//! kd-core - Core library for kanadrill
//!
//! This crate provides the practice-session logic for kanadrill: kana tables
//! and romaji conversion, answer matching, drill queue building, the session
//! timer, the reading-deck collaborator and the two session state machines.

pub mod error;
pub mod types;
pub mod config;
pub mod kana;
pub mod matcher;
pub mod queue;
pub mod timer;
pub mod deck;
pub mod session;

pub use error::{DrillError, Result};
pub use types::*;
