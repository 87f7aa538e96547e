//! gradewise-report: Results views, HTML and markdown output.
//!
//! Translates engine results into something a front-end can show without
//! knowing how a grade is computed.

pub mod html;
pub mod results;

pub use results::{ResultRow, ResultsView};
