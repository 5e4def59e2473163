//! Unit tests for SMS module

pub mod adapter_tests;
