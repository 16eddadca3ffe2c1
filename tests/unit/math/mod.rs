//! Unit tests for the `math` module
