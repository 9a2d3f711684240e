pub mod archive;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod roster;
