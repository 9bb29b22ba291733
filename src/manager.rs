//! Style manager tying all components together.

use crate::admin::{BulkAssignForm, BulkOutcome, SaveStyleForm};
use crate::auth::{AccessPolicy, Action, Token, TokenIssuer, BULK_SCOPE, SAVE_SCOPE};
use crate::css::{reconcile, strip_disallowed_markup};
use crate::error::{Result, StyleError};
use crate::registry::{BlockRegistry, StyleVariations};
use crate::slug::{preview_class, resolve_slug};
use crate::store::StyleStore;
use crate::types::{ListFilter, StyleDraft, StyleId, StyleRecord, StyleRow};
use tracing::{debug, info, warn};

/// The main style manager.
///
/// Provides a unified interface for:
/// - Saving styles (slug resolution + CSS reconciliation on every save)
/// - Bulk block assignment
/// - List-screen queries
/// - The idempotent publish pass
///
/// The store, registry, policy, and token issuer are explicit collaborators
/// owned by the manager; none of them is ambient state.
pub struct StyleManager {
    /// Persistent record store.
    store: StyleStore,

    /// Known block types.
    blocks: BlockRegistry,

    /// Consolidated authorization gate.
    policy: Box<dyn AccessPolicy>,

    /// Anti-forgery token issuer.
    tokens: TokenIssuer,
}

impl StyleManager {
    /// Create a manager over its collaborators.
    pub fn new(
        store: StyleStore,
        blocks: BlockRegistry,
        policy: Box<dyn AccessPolicy>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            store,
            blocks,
            policy,
            tokens,
        }
    }

    /// The underlying record store.
    pub fn store(&self) -> &StyleStore {
        &self.store
    }

    /// The block-type registry.
    pub fn blocks(&self) -> &BlockRegistry {
        &self.blocks
    }

    /// Token an editing surface embeds in its save form.
    pub fn issue_save_token(&self, actor: &str) -> Token {
        self.tokens.issue(SAVE_SCOPE, actor)
    }

    /// Token an editing surface embeds in its bulk-assign request.
    pub fn issue_bulk_token(&self, actor: &str) -> Token {
        self.tokens.issue(BULK_SCOPE, actor)
    }

    // --- Record Operations ---

    /// Create a new style record.
    pub fn create_style(&self, actor: &str, draft: StyleDraft) -> Result<StyleRecord> {
        self.authorize(actor, &Action::Create)?;
        Ok(self.store.add(draft))
    }

    /// Save a style from submitted form fields.
    ///
    /// Runs the full reconciliation pipeline: token check, authorization,
    /// block validation, slug resolution, CSS reconciliation, and markup
    /// stripping. The persisted values are exactly what a live editing
    /// surface running the same functions would have shown.
    pub fn save_style(&self, actor: &str, form: SaveStyleForm) -> Result<StyleRecord> {
        if !self.tokens.verify(&form.token, SAVE_SCOPE, actor) {
            return Err(StyleError::InvalidToken);
        }

        let record = match form.id {
            Some(id) => {
                self.authorize(actor, &Action::Update(id))?;
                self.store.get(id).ok_or(StyleError::StyleNotFound(id))?
            }
            None => {
                self.authorize(actor, &Action::Create)?;
                self.store.add(StyleDraft::default())
            }
        };

        // An unregistered block is treated as unset, not as an error.
        let mut block = form.block.clone();
        if !block.is_empty() && !self.blocks.is_registered(&block) {
            warn!(block = %block, "clearing unregistered block assignment");
            block.clear();
        }

        let title = form.title.trim().to_string();
        let style_name = if title.is_empty() {
            record.style_name.clone()
        } else {
            title.clone()
        };

        let slug = resolve_slug(&title, &form.slug, &record.resolved_slug);
        let css = strip_disallowed_markup(&reconcile(&slug, &form.css, false));

        let updated = self.store.update(record.id, |r| {
            r.title = title;
            r.explicit_slug = form.slug;
            r.style_name = style_name;
            r.block = block;
            r.css = css;
            r.resolved_slug = slug;
        })?;

        info!(id = %updated.id, slug = %updated.resolved_slug, "saved style");
        Ok(updated)
    }

    /// Assign a block to many styles at once.
    ///
    /// A non-empty block must be registered or the whole batch is rejected
    /// before any record is touched. Records the actor may not edit are
    /// silently skipped; partial success is allowed.
    pub fn bulk_assign_block(&self, actor: &str, form: BulkAssignForm) -> Result<BulkOutcome> {
        self.authorize(actor, &Action::BulkUpdate)?;

        if !self.tokens.verify(&form.token, BULK_SCOPE, actor) {
            return Err(StyleError::InvalidToken);
        }

        if !form.block.is_empty() && !self.blocks.is_registered(&form.block) {
            return Err(StyleError::UnknownBlock(form.block));
        }

        let mut outcome = BulkOutcome::default();
        for id in form.ids {
            if !self.policy.allows(actor, &Action::Update(id)) {
                outcome.skipped += 1;
                continue;
            }

            match self.store.update(id, |r| r.block = form.block.clone()) {
                Ok(_) => outcome.updated += 1,
                Err(StyleError::StyleNotFound(_)) => outcome.skipped += 1,
                Err(e) => return Err(e),
            }
        }

        info!(
            updated = outcome.updated,
            skipped = outcome.skipped,
            block = %form.block,
            "bulk block assignment"
        );
        Ok(outcome)
    }

    /// Move a style to the trash.
    pub fn trash_style(&self, actor: &str, id: StyleId) -> Result<StyleRecord> {
        self.authorize(actor, &Action::Delete(id))?;
        self.store.trash(id)
    }

    /// Restore a trashed style.
    pub fn restore_style(&self, actor: &str, id: StyleId) -> Result<StyleRecord> {
        self.authorize(actor, &Action::Update(id))?;
        self.store.restore(id)
    }

    /// Permanently delete a style.
    pub fn delete_style_permanently(&self, actor: &str, id: StyleId) -> Result<StyleRecord> {
        self.authorize(actor, &Action::Delete(id))?;
        self.store.delete_permanently(id)
    }

    // --- Publish Pass ---

    /// Build the published variation set from scratch.
    pub fn publish(&self) -> StyleVariations {
        let mut variations = StyleVariations::new();
        self.publish_into(&mut variations);
        variations
    }

    /// Register every publishable style into an existing set.
    ///
    /// Records with no block, an unregistered block, or an empty resolved
    /// slug are skipped silently, never as an error. Re-running with
    /// unchanged inputs yields an identical set.
    pub fn publish_into(&self, variations: &mut StyleVariations) {
        for record in self.store.list_published() {
            if record.block.is_empty() {
                continue;
            }
            if !self.blocks.is_registered(&record.block) {
                debug!(
                    id = %record.id,
                    block = %record.block,
                    "skipping style for unregistered block"
                );
                continue;
            }

            let slug = resolve_slug(&record.title, &record.explicit_slug, &record.resolved_slug);
            if slug.is_empty() {
                continue;
            }

            let label = Self::display_label(&record, &slug);
            let inline_css = strip_disallowed_markup(&reconcile(&slug, &record.css, false));

            variations.insert(crate::types::StyleVariation {
                block: record.block,
                name: slug,
                label,
                inline_css,
            });
        }

        info!(count = variations.len(), "published style variations");
    }

    /// Label for the style picker: title, falling back to the stored
    /// style name, falling back to the slug.
    fn display_label(record: &StyleRecord, slug: &str) -> String {
        if !record.title.is_empty() {
            record.title.clone()
        } else if !record.style_name.is_empty() {
            record.style_name.clone()
        } else {
            slug.to_string()
        }
    }

    // --- List-Screen Queries ---

    /// Rows for the list screen, with block labels and class previews.
    pub fn rows(&self, filter: &ListFilter) -> Vec<StyleRow> {
        self.store
            .list(filter)
            .into_iter()
            .map(|record| {
                let slug =
                    resolve_slug(&record.title, &record.explicit_slug, &record.resolved_slug);
                let block_label = if record.block.is_empty() {
                    String::new()
                } else {
                    self.blocks.label(&record.block)
                };

                StyleRow {
                    id: record.id,
                    title: record.title,
                    status: record.status,
                    block: record.block,
                    block_label,
                    class_preview: preview_class(&slug),
                }
            })
            .collect()
    }

    /// Filter options for the list screen: blocks actually used by
    /// published styles, labeled and sorted case-insensitively.
    ///
    /// A block that is no longer registered still appears, labeled by its
    /// raw identifier.
    pub fn block_filter_options(&self) -> Vec<(String, String)> {
        let mut options: Vec<(String, String)> = self
            .store
            .used_blocks()
            .into_iter()
            .map(|name| {
                let label = self.blocks.label(&name);
                (name, label)
            })
            .collect();

        options.sort_by(|a, b| {
            a.1.to_lowercase()
                .cmp(&b.1.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        });
        options
    }

    /// Sync the store to disk.
    pub fn sync(&self) -> Result<()> {
        self.store.save()
    }

    // --- Private Helpers ---

    fn authorize(&self, actor: &str, action: &Action) -> Result<()> {
        if self.policy.allows(actor, action) {
            Ok(())
        } else {
            Err(StyleError::Forbidden)
        }
    }
}
