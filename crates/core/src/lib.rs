//! Mini Shop Core - Shared types library.
//!
//! This crate provides the domain types used across all Mini Shop components:
//! - `storefront` - Cart store, catalog view and controller
//! - `cli` - Command-line front end over the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivations - no I/O, no
//! timers, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product and cart records, prices, ids, and filter state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
