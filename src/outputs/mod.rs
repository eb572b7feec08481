//! Output generation.
//!
//! A run produces exactly one JSON object on stdout; see [`json`].

pub mod json;
