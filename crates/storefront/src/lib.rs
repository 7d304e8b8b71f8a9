//! Neon storefront library.
//!
//! The core of the storefront is the [`cart`] module: a per-session cart
//! with derived totals. Around it sit the read-only [`catalog`], the
//! [`session`] that binds an actor to a cart, and the [`admin`] views gated
//! by [`auth`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

pub use error::{AppError, Result};
