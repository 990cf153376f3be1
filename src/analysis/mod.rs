//! Analysis module for sampled flight data
//!
//! This module provides numeric helpers used by the plot engine:
//! - Linear interpolation of one sampled quantity against another

pub mod interpolate;

pub use interpolate::LinearInterpolator;
