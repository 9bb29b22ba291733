//! Integration tests for the style library.

use block_styles::{
    BlockRegistry, BulkAssignForm, CapabilityPolicy, ListFilter, SaveStyleForm, StoreConfig,
    StyleDraft, StyleId, StyleManager, StyleStatus, StyleStore, TokenIssuer,
};
use tempfile::TempDir;

const EDITOR: &str = "editor";

fn test_store(dir: &TempDir) -> StyleStore {
    StyleStore::create(StoreConfig {
        path: dir.path().join("styles"),
        create_if_missing: true,
    })
    .unwrap()
}

fn test_manager(dir: &TempDir) -> StyleManager {
    let blocks = BlockRegistry::new();
    blocks.register("core/quote", "Quote");
    blocks.register("core/list", "List");
    blocks.register("core/gallery", "Gallery");

    let mut policy = CapabilityPolicy::new();
    policy.grant(EDITOR);

    StyleManager::new(
        test_store(dir),
        blocks,
        Box::new(policy),
        TokenIssuer::new(b"integration-secret".to_vec()),
    )
}

fn form(manager: &StyleManager, id: Option<StyleId>) -> SaveStyleForm {
    SaveStyleForm {
        id,
        title: String::new(),
        slug: String::new(),
        block: String::new(),
        css: String::new(),
        token: manager.issue_save_token(EDITOR),
    }
}

// --- Realistic Workflow Tests ---

#[test]
fn test_editor_authoring_workflow() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    // Editor creates a style and types a title; the CSS scaffold follows.
    let mut save = form(&manager, None);
    save.title = "Fancy Quote".to_string();
    save.block = "core/quote".to_string();
    let record = manager.save_style(EDITOR, save).unwrap();

    assert_eq!(record.resolved_slug, "fancy-quote");
    assert_eq!(record.css, ".is-style-fancy-quote {\n\n}");

    // Editor fills the scaffold in and saves again.
    let mut save = form(&manager, Some(record.id));
    save.title = "Fancy Quote".to_string();
    save.block = "core/quote".to_string();
    save.css = ".is-style-fancy-quote {\n  border-left: 4px solid;\n}".to_string();
    let record = manager.save_style(EDITOR, save).unwrap();

    assert_eq!(
        record.css,
        ".is-style-fancy-quote {\n  border-left: 4px solid;\n}"
    );

    // Publishing the record surfaces it in the variation set.
    manager
        .store()
        .update(record.id, |r| r.status = StyleStatus::Published)
        .unwrap();

    let published = manager.publish();
    let variation = published.get("core/quote", "fancy-quote").unwrap();
    assert_eq!(variation.label, "Fancy Quote");
    assert_eq!(
        variation.inline_css,
        ".is-style-fancy-quote {\n  border-left: 4px solid;\n}"
    );
}

#[test]
fn test_retyping_slug_refreshes_scaffold_only() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    // First save leaves stale boilerplate for the old slug behind.
    let mut save = form(&manager, None);
    save.title = "Old Name".to_string();
    let record = manager.save_style(EDITOR, save).unwrap();
    assert_eq!(record.css, ".is-style-old-name {\n\n}");

    // Editor types an explicit slug; untouched boilerplate is refreshed.
    let mut save = form(&manager, Some(record.id));
    save.title = "Old Name".to_string();
    save.slug = "New Slug".to_string();
    save.css = record.css.clone();
    let record = manager.save_style(EDITOR, save).unwrap();

    assert_eq!(record.resolved_slug, "new-slug");
    assert_eq!(record.css, ".is-style-new-slug {\n\n}");
}

#[test]
fn test_bulk_assignment_workflow() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    let ids: Vec<StyleId> = (0..3)
        .map(|i| {
            manager
                .create_style(EDITOR, StyleDraft::new(format!("Style {i}")))
                .unwrap()
                .id
        })
        .collect();

    let outcome = manager
        .bulk_assign_block(
            EDITOR,
            BulkAssignForm {
                ids: ids.clone(),
                block: "core/list".to_string(),
                token: manager.issue_bulk_token(EDITOR),
            },
        )
        .unwrap();

    assert_eq!(outcome.updated, 3);
    assert_eq!(outcome.skipped, 0);
    for id in &ids {
        assert_eq!(manager.store().get(*id).unwrap().block, "core/list");
    }

    // An empty block clears the assignment across the batch.
    let outcome = manager
        .bulk_assign_block(
            EDITOR,
            BulkAssignForm {
                ids,
                block: String::new(),
                token: manager.issue_bulk_token(EDITOR),
            },
        )
        .unwrap();

    assert_eq!(outcome.updated, 3);
    let rows = manager.rows(&ListFilter::default());
    assert!(rows.iter().all(|row| row.block.is_empty()));
}

#[test]
fn test_publish_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    for (title, block) in [("Fancy Quote", "core/quote"), ("Tight List", "core/list")] {
        let record = manager
            .create_style(EDITOR, StyleDraft::new(title).with_block(block))
            .unwrap();
        let mut save = form(&manager, Some(record.id));
        save.title = title.to_string();
        save.block = block.to_string();
        manager.save_style(EDITOR, save).unwrap();
        manager
            .store()
            .update(record.id, |r| r.status = StyleStatus::Published)
            .unwrap();
    }

    let first = manager.publish();
    let second = manager.publish();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);

    // Re-registering into an existing set changes nothing either.
    let mut third = first.clone();
    manager.publish_into(&mut third);
    assert_eq!(first, third);
}

#[test]
fn test_publish_skips_incomplete_records() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    // No block assigned.
    manager
        .create_style(
            EDITOR,
            StyleDraft::new("No Block").with_status(StyleStatus::Published),
        )
        .unwrap();

    // Block no longer registered.
    manager
        .create_style(
            EDITOR,
            StyleDraft::new("Gone Block")
                .with_block("plugin/gone")
                .with_status(StyleStatus::Published),
        )
        .unwrap();

    // No slug derivable from any source.
    manager
        .create_style(
            EDITOR,
            StyleDraft::new("!!!")
                .with_block("core/quote")
                .with_status(StyleStatus::Published),
        )
        .unwrap();

    // Draft, not published.
    manager
        .create_style(EDITOR, StyleDraft::new("Draft").with_block("core/quote"))
        .unwrap();

    assert!(manager.publish().is_empty());
}

#[test]
fn test_unregistering_block_drops_its_styles() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    let record = manager
        .create_style(
            EDITOR,
            StyleDraft::new("Fancy")
                .with_block("core/gallery")
                .with_status(StyleStatus::Published),
        )
        .unwrap();
    let mut save = form(&manager, Some(record.id));
    save.title = "Fancy".to_string();
    save.block = "core/gallery".to_string();
    manager.save_style(EDITOR, save).unwrap();
    manager
        .store()
        .update(record.id, |r| r.status = StyleStatus::Published)
        .unwrap();

    assert_eq!(manager.publish().len(), 1);

    // The block disappears from the registry; the style silently drops.
    manager.blocks().unregister("core/gallery");
    assert!(manager.publish().is_empty());

    // The record itself is untouched and still lists.
    assert_eq!(manager.rows(&ListFilter::default()).len(), 1);
}

#[test]
fn test_trash_lifecycle() {
    let dir = TempDir::new().unwrap();
    let manager = test_manager(&dir);

    let record = manager
        .create_style(
            EDITOR,
            StyleDraft::new("Fancy")
                .with_slug("fancy")
                .with_block("core/quote")
                .with_status(StyleStatus::Published),
        )
        .unwrap();

    assert_eq!(manager.publish().len(), 1);

    // Trashing removes the style from listings and the published set.
    manager.trash_style(EDITOR, record.id).unwrap();
    assert!(manager.publish().is_empty());
    assert!(manager.rows(&ListFilter::default()).is_empty());

    // Restoring brings it back as a draft.
    let restored = manager.restore_style(EDITOR, record.id).unwrap();
    assert_eq!(restored.status, StyleStatus::Draft);
    assert_eq!(manager.rows(&ListFilter::default()).len(), 1);

    manager.delete_style_permanently(EDITOR, record.id).unwrap();
    assert!(manager.store().get(record.id).is_none());
}

#[test]
fn test_saved_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        path: dir.path().join("styles"),
        create_if_missing: true,
    };

    let blocks = || {
        let registry = BlockRegistry::new();
        registry.register("core/quote", "Quote");
        registry
    };
    let policy = || {
        let mut p = CapabilityPolicy::new();
        p.grant(EDITOR);
        Box::new(p)
    };

    let first_publish = {
        let manager = StyleManager::new(
            StyleStore::create(config.clone()).unwrap(),
            blocks(),
            policy(),
            TokenIssuer::new(b"integration-secret".to_vec()),
        );

        let mut save = form(&manager, None);
        save.title = "Fancy Quote".to_string();
        save.block = "core/quote".to_string();
        save.css = ".is-style-fancy-quote { color: red; }".to_string();
        let record = manager.save_style(EDITOR, save).unwrap();
        manager
            .store()
            .update(record.id, |r| r.status = StyleStatus::Published)
            .unwrap();

        manager.sync().unwrap();
        manager.publish()
    };

    // A fresh process over the same store publishes the identical set.
    let manager = StyleManager::new(
        StyleStore::open(config).unwrap(),
        blocks(),
        policy(),
        TokenIssuer::new(b"integration-secret".to_vec()),
    );

    assert_eq!(manager.store().count(), 1);
    assert_eq!(manager.publish(), first_publish);
}
