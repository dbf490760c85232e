//! Infrastructure layer.
//!
//! Technical concerns that support the monitor without containing business
//! logic: configuration loading, logging setup and component factories.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions

pub mod config;
pub mod factory;
