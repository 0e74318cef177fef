//! Strategy math: odds normalisation, probability estimation, edge
//! detection, confidence scoring and Kelly stake sizing.
//!
//! Everything here is a pure function of its inputs; no state is carried
//! between calls.

pub mod confidence;
pub mod edge;
pub mod estimator;
pub mod kelly;
pub mod odds;
