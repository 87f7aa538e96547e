//! gradewise-core: Grade engine, course store, and wizard state machine.
//!
//! This crate holds everything that decides a grade: the scoring formulas and
//! threshold table, the in-memory course list, the draft that accumulates a
//! course across wizard steps, and the step sequencer that gates data entry.
//! Rendering lives behind the [`presenter::Presenter`] trait.

pub mod animation;
pub mod draft;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod presenter;
pub mod store;
pub mod theme;
pub mod wizard;

pub use error::{Field, GradeError};
