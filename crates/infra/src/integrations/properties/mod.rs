//! Properties service adapter

mod client;

pub use client::HttpPropertyDirectory;
