//! # Mutagenex Core Library
//!
//! Batch point mutagenesis for protein structure files, driven through an
//! external molecular-modeling engine's mutagenesis capability.
//!
//! The library is split into three layers:
//!
//! - **[`core`]: The Foundation.** Stateless data models (the amino-acid
//!   catalog, mutation records), mutation-specification parsing and
//!   validation, and structure-file discovery.
//!
//! - **[`engine`]: The Protocol Core.** The [`engine::MutationEngine`]
//!   capability trait, the scoped [`engine::session::EngineSession`] that owns
//!   the engine's working context for exactly one file, the PyMOL adapter,
//!   and the per-file mutation applier with its partial-failure semantics.
//!
//! - **[`workflows`]: The Public API.** The batch entry point that ties
//!   discovery, validation, and application together into one run.

pub mod core;
pub mod engine;
pub mod workflows;
