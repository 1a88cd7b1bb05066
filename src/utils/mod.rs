//! Process bootstrap and retry helpers shared by the binary and services.

pub mod bootstrap;
pub mod retry;
