//! Market data adapters.
//!
//! Implements the `port::PriceSource` and `port::DepthSource` traits.

mod book;
mod rest;

pub use book::BookSource;
pub use rest::{RestBookSource, RestSourceConfig};
