//! # Saaty Application
//!
//! The HTTP server, CLI and reports around `saaty-core`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 apps/saaty (THE BINARY)              │
//! │                                                      │
//! │  ┌──────────────┐   ┌────────────┐   ┌────────────┐  │
//! │  │ CLI + form   │   │  HTTP API  │   │  reports   │  │
//! │  │  (clap)      │   │  (axum)    │   │  (text)    │  │
//! │  └──────┬───────┘   └─────┬──────┘   └─────┬──────┘  │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                   ┌───────────────┐                  │
//! │                   │  saaty-core   │                  │
//! │                   └───────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod report;
