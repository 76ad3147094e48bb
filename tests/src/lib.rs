//! Shared fixtures for the isopair property and end-to-end suites
pub mod fixtures;
pub mod strategies;
