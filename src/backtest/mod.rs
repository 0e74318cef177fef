//! Offline evaluation of settled recommendations.

pub mod calibration;
