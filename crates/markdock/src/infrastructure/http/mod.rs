//! HTTP transport infrastructure for the news feed.
//!
//! [`ReqwestTransport`] is the production [`HttpTransport`]; the `mock`
//! sub-module provides a scripted transport for tests that counts requests
//! instead of touching the network.
//!
//! [`HttpTransport`]: crate::application::fetch_news::HttpTransport

pub mod mock;
pub mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
