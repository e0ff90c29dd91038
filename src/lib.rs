//! arbsweep - unused translation key cleaner for Flutter ARB files
//!
//! arbsweep scans a Dart source tree for references to the keys of the master
//! ARB file, classifies each key as used, referenced only from comments, or
//! unused, and can remove the unused ones from every locale file after taking
//! a backup.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, prompts, console output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Loading, classification, reporting, backup and removal

pub mod cli;
pub mod config;
pub mod core;
