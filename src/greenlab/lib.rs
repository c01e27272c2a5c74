//! # Greenlab Architecture
//!
//! Greenlab is a **UI-agnostic urban greening planner**: a read-only plant catalog,
//! planting projects, a care journal, favorites, and a handful of planning calculators.
//! The terminal client in `main.rs` is one consumer of the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the single copy of user state                       │
//! │  - Persists and notifies after every mutation               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure logic over in-memory collections                    │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: one JSON blob per key              │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `catalog` and `calc` sit beside the stack: the catalog is static data compiled into
//! the binary, and the calculators are pure functions with no state at all.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the process,
//! and never assumes a terminal. Diagnostics go through `tracing`; user-facing outcomes
//! come back as [`commands::CmdMessage`]s for the front end to render.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): thorough unit tests of the business logic.
//! 2. **API** (`api.rs`): persistence, failure handling and notification, over `MemBackend`.
//! 3. **CLI** (`tests/cli_e2e.rs`): end-to-end runs of the binary against a temp data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all stateful operations
//! - [`commands`]: Mutation and query logic
//! - [`store`]: Blob storage abstraction and implementations
//! - [`model`]: Core data types (`Plant`, `Project`, `JournalEntry` and their enums)
//! - [`catalog`]: The built-in plant catalog and its search
//! - [`calc`]: Planning calculators
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod calc;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
