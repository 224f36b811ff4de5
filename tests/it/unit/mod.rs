//! Unit tests for the bubble canvas public API.

mod geometry_tests;
