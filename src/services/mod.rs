//! Core services for walking, probing, aggregation, and report modelling

pub mod aggregate;
pub mod format;
pub mod probe;
pub mod report;
pub mod traverse;
