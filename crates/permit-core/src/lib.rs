//! # permit-core
//!
//! Runtime permission evaluation over injected host providers.
//!
//! This crate provides:
//! - The three host-facing traits (`StatusProvider`, `RationaleProvider`,
//!   `IdentifierSource`)
//! - The stateless evaluator functions in [`evaluator`]
//! - `PermissionFlow`, which drives the request / explain / settings cycle
//! - `InMemoryHost`, a provider backed by a plain map for tests and demos
//!
//! ## Usage
//!
//! ```rust,ignore
//! use permit_core::{evaluator, InMemoryHost};
//!
//! let ids = evaluator::required_identifiers(Capability::Camera, PlatformVersion(34));
//! let ready = evaluator::has_permissions(Some(&host), Some(&ids));
//! ```

pub mod evaluator;
pub mod flow;
pub mod memory;
pub mod traits;

pub use evaluator::BuiltinIdentifiers;
pub use flow::PermissionFlow;
pub use memory::InMemoryHost;
