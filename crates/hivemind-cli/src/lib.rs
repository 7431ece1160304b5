//! HiveMind CLI library — command implementations shared by the `hivemind`
//! binary and its integration tests.

pub mod commands;
