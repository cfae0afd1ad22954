//! Integration tests for the anagen toolchain

mod cli_commands;
mod config_integration;
mod dataset_resolution;
mod scaffold_generation;
mod test_utils;
