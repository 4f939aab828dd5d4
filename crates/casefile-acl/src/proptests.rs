//! Property-based tests for access decisions.
