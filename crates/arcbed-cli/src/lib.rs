//! arcbed CLI library.
//!
//! Config loading, asset export, and the command implementations behind the
//! `arcbed` binary.

pub mod commands;
pub mod export;
pub mod input;
