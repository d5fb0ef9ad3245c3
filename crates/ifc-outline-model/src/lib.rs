// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Outline Model - Shared types and store trait for hierarchy resolution
//!
//! This crate provides the vocabulary for working with flat, pre-parsed
//! building-model records and defines the [`RecordStore`] trait that model
//! backends implement. The resolution engine in `ifc-outline-engine` is
//! written entirely against these types and the trait, so it never touches
//! a concrete model format.
//!
//! # Architecture
//!
//! - [`Record`], [`FieldValue`], [`Ref`] - the flat record graph
//! - [`RecordStore`] - the external record-access collaborator
//! - [`DisplayNode`] - the resolved display hierarchy
//! - [`Property`], [`RecordDetails`] - resolved property views
//! - [`MemoryStore`] - in-memory reference backend, used by tests

pub mod error;
pub mod memory;
pub mod properties;
pub mod store;
pub mod tree;
pub mod types;

// Re-export all public types
pub use error::*;
pub use memory::*;
pub use properties::*;
pub use store::*;
pub use tree::*;
pub use types::*;
