// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for cml.
//!
//! This module handles command-line argument parsing and the lint run
//! itself.

pub mod args;
mod dispatch;

pub use args::Cli;
pub use dispatch::run;
