//! Property-based test suite entry point.

mod ranking_tests;
