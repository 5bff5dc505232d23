//! Shared test helpers for `roster-core` integration tests.
//!
//! These helpers provide in-memory repositories and a fixture that wires
//! them into the engine services, so tests can focus on behaviour instead
//! of boilerplate.

#![allow(dead_code)]

pub mod fixture;
pub mod repositories;
