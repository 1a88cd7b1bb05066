//! Casematch - defendant identity resolution
//!
//! Resolves an observed defendant against the unified case search index by
//! escalating through exact then partial attribute searches, and records the
//! outcome as an event on the defendant's case stream.

pub mod clients;
pub mod config;
pub mod interfaces;
pub mod model;
pub mod repository;
pub mod search;
pub mod services;
pub mod storage;
pub mod utils;
