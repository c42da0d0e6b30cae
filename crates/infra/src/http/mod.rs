//! HTTP plumbing shared by the sheet reader, the script gateway, and the
//! rates provider.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
