//! REST client for the document-intelligence backend.
//!
//! All processing (ingestion, chunking, retrieval, answering) happens
//! remotely; this crate shapes requests, attaches the bearer token and folds
//! every failure into [`docintel_core::Error`].

pub mod auth;
pub mod client;
pub mod server;

pub use auth::{NoToken, StaticToken, TokenProvider, TokenStore, AUTH_TOKEN_KEY};
pub use client::ApiClient;
pub use server::ServerFetcher;
