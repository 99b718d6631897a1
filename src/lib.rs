#[macro_use]
extern crate tracing;

pub mod cluster;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod filter;
pub mod report;
pub mod shutdown;
pub mod snapshot;
pub mod table;
