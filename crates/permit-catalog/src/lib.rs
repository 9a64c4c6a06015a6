//! # permit-catalog
//!
//! A TOML-driven capability catalog for the PERMIT evaluator.
//!
//! ## Overview
//!
//! This crate provides [`CapabilityCatalog`], which implements the
//! [`IdentifierSource`](permit_core::traits::IdentifierSource) trait.
//! Capabilities are declared in a TOML file with base identifiers and
//! version-gated variants; the first variant the platform version meets wins.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use permit_catalog::CapabilityCatalog;
//!
//! let catalog = CapabilityCatalog::from_file(Path::new("catalog.toml"))?;
//! ```

pub mod catalog;
pub mod rule;

pub use catalog::CapabilityCatalog;
pub use rule::{CapabilityEntry, CatalogConfig, VersionVariant};

// ── Tests ─────────────────────────────────────────────────────────────────────
