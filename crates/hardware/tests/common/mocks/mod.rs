//! Front panel doubles.

pub mod panel;
