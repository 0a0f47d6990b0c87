//! skillradar-report — Candidate report rendering.
//!
//! Turns a `CandidateReport` into a self-contained, printable HTML page.

pub mod html;

pub use html::{generate_html, generate_html_at, write_html_report};
