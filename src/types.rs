//! Core types for the style library.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a style record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StyleId(pub u64);

impl fmt::Debug for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleId({})", self.0)
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Microseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Lifecycle state of a style record.
///
/// Only `Published` records contribute to the published variation set.
/// `Trashed` records are hidden from listings by default and can be restored
/// or permanently deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleStatus {
    Published,
    Draft,
    Trashed,
}

impl Default for StyleStatus {
    fn default() -> Self {
        StyleStatus::Draft
    }
}

/// A persisted style variation record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StyleRecord {
    /// Unique identifier (assigned by the store).
    pub id: StyleId,

    /// Lifecycle state.
    pub status: StyleStatus,

    /// Human-readable display name; also the raw input to slug derivation.
    pub title: String,

    /// User-assigned slug, independent of the title. May be empty.
    pub explicit_slug: String,

    /// Stored display-name fallback used when the title is empty.
    pub style_name: String,

    /// Target block-type identifier. Empty means unset; an unregistered
    /// value is treated as unset at publish time.
    pub block: String,

    /// Editor-authored CSS source.
    pub css: String,

    /// Canonical slug cached at save time, used to build the selector.
    pub resolved_slug: String,

    /// When the record was created.
    pub created: Timestamp,

    /// When the record was last saved.
    pub modified: Timestamp,
}

/// Input for creating a new style record (before an id is assigned).
///
/// Records start out empty: no slug, no CSS, no block assignment.
#[derive(Clone, Debug, Default)]
pub struct StyleDraft {
    pub title: String,
    pub explicit_slug: String,
    pub style_name: String,
    pub block: String,
    pub css: String,
    pub status: StyleStatus,
}

impl StyleDraft {
    /// Create a draft with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the explicit slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.explicit_slug = slug.into();
        self
    }

    /// Set the target block type.
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    /// Set the CSS source.
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = css.into();
        self
    }

    /// Set the lifecycle state.
    pub fn with_status(mut self, status: StyleStatus) -> Self {
        self.status = status;
        self
    }
}

/// A published style variation, keyed by `(block, name)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleVariation {
    /// Block type the variation applies to.
    pub block: String,

    /// Canonical slug; the editor class is `is-style-<name>`.
    pub name: String,

    /// Display label shown in the style picker.
    pub label: String,

    /// Sanitized inline CSS emitted for the variation.
    pub inline_css: String,
}

/// List-screen projection of a style record.
#[derive(Clone, Debug, Serialize)]
pub struct StyleRow {
    pub id: StyleId,
    pub title: String,
    pub status: StyleStatus,

    /// Raw block identifier; empty when unset.
    pub block: String,

    /// Registry label for the block, or the raw identifier when the block
    /// is no longer registered. Empty when unset.
    pub block_label: String,

    /// `is-style-<slug>`, or the `is-style-{slug}` placeholder when the
    /// record has no slug yet.
    pub class_preview: String,
}

/// Filter for store listings.
#[derive(Clone, Debug, Default)]
pub struct ListFilter {
    /// Restrict to a lifecycle state. None lists everything except trash.
    pub status: Option<StyleStatus>,

    /// Restrict to records assigned to this block.
    pub block: Option<String>,
}

impl ListFilter {
    /// Only published records.
    pub fn published() -> Self {
        Self {
            status: Some(StyleStatus::Published),
            ..Default::default()
        }
    }

    /// Records assigned to a block, any non-trashed status.
    pub fn for_block(block: impl Into<String>) -> Self {
        Self {
            block: Some(block.into()),
            ..Default::default()
        }
    }
}
