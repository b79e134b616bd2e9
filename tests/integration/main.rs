//! Integration test suite entry point.

mod fixture;
mod scenario_tests;
