//! Command Handlers Module
//!
//! This module contains handlers for all CLI subcommands.

pub mod libraries;
pub mod manifest;
pub mod scan;
