//! Scoop Core - Shared types library.
//!
//! This crate provides the common types used across the Scoop Shop
//! components:
//! - `storefront` - The cart/pricing subsystem
//! - `integration-tests` - Cross-module test journeys
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
