//! Outbound HTTP plumbing shared by the integration adapters

mod client;

pub use client::{ensure_success, HttpClient, HttpClientBuilder};
