//! Post-mix effects.

pub mod reverb;
