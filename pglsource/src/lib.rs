//! # PGLSource
//!
//! Common traits and types for PGLPhoto asset sources.
//!
//! This crate provides the foundational abstractions shared by the PGLPhoto
//! ecosystem: a paged, stably-ordered provider of photo-library entries and
//! the collaborators around it.
//!
//! ## Features
//!
//! - **Paged access**: `AssetSource::fetch_page(offset, limit)` over a
//!   creation-time ordered collection, with parameter validation before any
//!   I/O.
//! - **Image retrieval**: `ImageFetcher` delivers thumbnail or full-size
//!   blobs for a given asset, independent of any transport.
//! - **Permission gate**: `AccessGate` models the authorization state that
//!   must be `Granted` before paging starts.
//! - **Reference implementation**: [`MemoryAssetSource`], an in-memory source
//!   usable as a test double or as a starting point for real sources.
//! - **Send + Sync**: ready for async services.

mod fetch;
mod gate;
mod memory;
mod source;
mod types;

// Réexports publics
pub use fetch::{FetchError, ImageFetcher};
pub use gate::{AccessGate, AccessStatus, StaticGate};
pub use memory::{MemoryAsset, MemoryAssetSource};
pub use source::{
    AssetSource, InvalidPageRequest, MAX_PAGE_LIMIT, validate_page_request,
};
pub use types::{AssetEntry, AssetMetadata, AssetPage, AssetRecord, LoadState, Variant};
