//! Intersection Traffic Simulation Library
//!
//! Models a day of traffic through one four-way intersection under a timed
//! signal, a stop sign or a roundabout, and writes the resulting trips out
//! for analysis.

pub mod report;
pub mod simulation;
