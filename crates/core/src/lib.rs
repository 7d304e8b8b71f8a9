//! Neon Core - Shared value types.
//!
//! This crate provides the small value types used across the Neon components:
//! - `storefront` - Catalog browsing, shopping cart, session and admin gate
//! - `cli` - Command-line front end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no logging, no async. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and actors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
