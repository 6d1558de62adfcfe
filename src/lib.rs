//! hola-server
//!
//! A small hyper-based HTTP server answering `/health` and `/hello`.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
