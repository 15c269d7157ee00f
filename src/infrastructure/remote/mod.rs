//! Upstream API client and wire types

mod client;
pub mod dto;

pub use client::SyncClient;
