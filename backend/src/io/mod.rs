//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain.

pub mod rest;

pub use rest::*;
