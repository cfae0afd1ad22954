//! anagen: CMS analysis scaffolding toolchain
//!
//! Resolves datasets into remote file lists, generates ROOT analysis frameworks from a
//! sample file, and fans analysis jobs out to HTCondor one input file per task.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod filelist;
pub mod fsutil;
pub mod logging;
pub mod resolver;
pub mod scaffold;
