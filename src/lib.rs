//! # Block Styles
//!
//! Named style variations for content blocks, each backed by
//! editor-authored CSS.
//!
//! ## Core Concepts
//!
//! - **Styles**: Persisted records with a title, target block, and CSS
//! - **Slugs**: Canonical CSS-safe names derived from titles or slug fields
//! - **Reconciliation**: Keeps the CSS buffer synchronized with the slug,
//!   refreshing boilerplate and never overwriting authored content
//! - **Publishing**: Idempotent registration of `(block, slug)` variations
//!
//! ## Example
//!
//! ```ignore
//! use block_styles::{
//!     BlockRegistry, CapabilityPolicy, SaveStyleForm, StoreConfig,
//!     StyleManager, StyleStore, TokenIssuer,
//! };
//!
//! let store = StyleStore::open_or_create(StoreConfig {
//!     path: "./styles".into(),
//!     ..Default::default()
//! })?;
//!
//! let blocks = BlockRegistry::new();
//! blocks.register("core/quote", "Quote");
//!
//! let mut policy = CapabilityPolicy::new();
//! policy.grant("editor");
//!
//! let manager = StyleManager::new(
//!     store,
//!     blocks,
//!     Box::new(policy),
//!     TokenIssuer::new(b"secret".to_vec()),
//! );
//!
//! let record = manager.save_style("editor", SaveStyleForm {
//!     id: None,
//!     title: "Fancy Quote".into(),
//!     slug: String::new(),
//!     block: "core/quote".into(),
//!     css: String::new(),
//!     token: manager.issue_save_token("editor"),
//! })?;
//!
//! assert_eq!(record.resolved_slug, "fancy-quote");
//! let published = manager.publish();
//! ```

pub mod admin;
pub mod auth;
pub mod css;
pub mod error;
pub mod manager;
pub mod registry;
pub mod slug;
pub mod store;
pub mod types;

// Re-exports
pub use admin::{AdminResponse, BulkAssignForm, BulkOutcome, SaveStyleForm};
pub use auth::{
    AccessPolicy, Action, CapabilityPolicy, Token, TokenIssuer, BULK_SCOPE, SAVE_SCOPE,
};
pub use css::{boilerplate, looks_like_boilerplate, reconcile, strip_disallowed_markup};
pub use error::{Result, StyleError};
pub use manager::StyleManager;
pub use registry::{BlockRegistry, StyleVariations};
pub use slug::{preview_class, resolve_slug, slugify, style_class};
pub use store::{StoreConfig, StyleStore};
pub use types::*;
