//! # PMJAY Slip Architecture
//!
//! pmjay fills in pre-printed PMJAY hospital admission slips: one A4 page per
//! day of a patient's stay, with the patient's details stamped at fixed
//! positions. It also remembers the last few patients so a slip can be
//! regenerated without retyping.
//!
//! The library is UI-agnostic; the `pmjay` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (pmjay binary)                                         │
//! │  - Parses arguments, prints tables, owns exit codes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - generate, print, save, search, list                      │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Layout + Render              │ │  Record Store (store/)    │
//! │  - Field positions, wrapping  │ │  - Bounded, deduplicated  │
//! │  - PDF output                 │ │  - CSV file, lazy load    │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! Rendering and printing sit behind traits ([`render::DocumentRenderer`],
//! [`print::Printer`]) so the whole flow runs in memory under test.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`layout`]: Field position table and page layout
//! - [`render`]: PDF output
//! - [`print`]: Handing documents to the printer
//! - [`store`]: Bounded record store and its backends
//! - [`model`]: `FormRecord`, `Gender`, date helpers
//! - [`config`]: Configuration management
//! - [`init`]: Wiring the production context
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod layout;
pub mod model;
pub mod print;
pub mod render;
pub mod store;
