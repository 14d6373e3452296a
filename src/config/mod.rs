// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cml.
//!
//! This module handles locating and parsing configuration files and
//! resolving the exit-code table from the environment.

mod exit_codes;
mod loader;
mod schema;

pub use exit_codes::ExitCodes;
pub use loader::{find_config_file, find_config_file_from, load_config, load_config_from, parse_config};
pub use schema::LintConfig;
