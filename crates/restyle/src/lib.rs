//! # Restyle Architecture
//!
//! Restyle keeps per-domain style overrides. Each domain owns an ordered list of
//! rules, every rule is a named ("tagged") fragment of CSS that can be toggled on
//! and off independently, and whenever a page from that domain finishes loading
//! the enabled fragments are handed to the host for injection.
//!
//! This is a **UI-agnostic library** with a thin CLI client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients (restyle-cli, browser host glue)                   │
//! │  - Parse input, render output, own terminal / page I/O      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Normalizes URLs / host text into domain keys             │
//! │  - Dispatches to commands, drives the host injector         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Rule editor (save, toggle, delete), matcher, listing     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: raw key → JSON value               │
//! │  - RuleStore: canonical writes, per-domain locking          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Shapes
//!
//! Three shapes have been written to storage over time. All of them are read,
//! only the tagged array is ever written. See [`model`] for the normalizer.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Rule editor, injection matcher and listing logic
//! - [`store`]: Storage abstraction, backends and per-domain locks
//! - [`model`]: `Rule` and the stored-shape normalizer
//! - [`domain`]: URL / host text to domain key
//! - [`host`]: The style-injection seam implemented by the embedding host
//! - [`config`]: Configuration loading
//! - [`init`]: Wiring of paths, config and the filesystem store
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod init;
pub mod model;
pub mod store;
