//! # Dragly Architecture
//!
//! Dragly keeps a persistent, ordered queue of short text snippets. A snippet is
//! "spent" by dragging or copying it into another application; spent snippets
//! are marked used rather than deleted, so they stay visible until cleared.
//!
//! The crate is the **store and consumption state machine** behind that. Window,
//! menu-bar and hotkey glue live in the host and only call into the facade.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (main.rs + cli/, or any GUI shell)                    │
//! │  - Builds one QueueStore at startup, flushes at shutdown    │
//! │  - Drives ExportSession from drag/clipboard events          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade (api.rs) + Export protocol (export.rs)              │
//! │  - Mutate, persist, notify as one step                      │
//! │  - Id-keyed, idempotent export callbacks                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                 │
//! │  - Ordered list, identity lookups, no I/O                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - PersistenceGateway over a SlotBackend                    │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//!
//! Nothing in the core is fatal. Blank text is rejected silently, unknown ids
//! are no-ops, and storage faults are logged through `tracing` while the
//! in-memory list stays authoritative.
//!
//! ## Module Overview
//!
//! - [`api`]: The [`QueueStore`](api::QueueStore) facade
//! - [`export`]: Drag/export state machine and the copy action
//! - [`repository`]: In-memory ordered item list
//! - [`store`]: Persistence gateway and slot backends
//! - [`model`]: `Item`, `ItemId`, `ItemState` and the record format
//! - [`index`]: 1-based display indexes for hosts
//! - [`config`]: Configuration and data directory resolution
//! - [`clipboard`]: OS clipboard writer
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod model;
pub mod repository;
pub mod store;
