//! HTTP client layer: `AdminHttp`.

pub mod client;

pub use client::AdminHttp;
