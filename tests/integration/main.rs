//! Integration tests

mod common;
mod config_test;
mod relay_test;
