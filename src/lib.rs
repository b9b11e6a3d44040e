//! # rowgate
//!
//! A pooled, async access layer over wide-column (HBase-style) stores:
//! - `family:qualifier` column addressing with a configurable default family
//! - Batched mutation construction with canonical value serialization
//! - Declarative column-value filters compiled per scan
//! - Resumable scan pagination with continuation markers
//! - Empty-column reaping ahead of writes
//! - Bounded, pre-warmed, idle-evicted connection pooling
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ConnectionPool                            │
//! │          (bounded, pre-warmed, idle-evicted)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ acquire() -> PooledClient
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     StoreClient                              │
//! │        get / put / delete / scan  (per row or batch)         │
//! └──────┬──────────────┬──────────────┬────────────────────────┘
//!        │              │              │
//!        ▼              ▼              ▼
//! ┌─────────────┐┌─────────────┐┌─────────────┐
//! │  Mutation   ││   Filter    ││    Scan     │
//! │  Building   ││ Compilation ││  Paginator  │
//! └──────┬──────┘└──────┬──────┘└──────┬──────┘
//!        │              │              │
//! ┌──────▼──────────────▼──────────────▼──────┐
//! │              Transport (trait)             │
//! │     the store's RPC client lives here      │
//! └────────────────────────────────────────────┘
//! ```
//!
//! The transport is an external collaborator: anything implementing
//! [`transport::Transport`] plugs in. [`transport::mem`] ships an
//! in-memory backend for tests and local development.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod row;
pub mod scan;
pub mod transport;

mod client;
mod pool;
mod reaper;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::StoreClient;
pub use config::{Config, ConfigBuilder, DEFAULT_FAMILY};
pub use error::{Result, StoreError};
pub use pool::{ConnectionPool, PooledClient};
pub use row::{ColumnMap, Row};
pub use scan::{FilterSpec, ScanRequest, ScanResult};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rowgate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
