//! Boilerplate generation and the replace-or-preserve decision.
//!
//! The same functions run on every keystroke in the editing surface, on
//! every save, and again at publish time, so the persisted CSS always
//! matches what the live editor would have produced.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a single `.is-style-<token>` rule with an all-whitespace body.
static BOILERPLATE_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\.is-style-[a-z0-9_-]+\s*\{\s*\}$").expect("valid boilerplate pattern")
});

/// Scaffold CSS for a slug: an empty rule on the style's selector.
///
/// Empty for an empty slug, so clearing the slug also clears the scaffold.
pub fn boilerplate(slug: &str) -> String {
    if slug.is_empty() {
        String::new()
    } else {
        format!(".is-style-{slug} {{\n\n}}\n")
    }
}

/// Heuristic "has the user not yet typed anything meaningful" detector.
///
/// True for empty or whitespace-only buffers, and for a single empty
/// `.is-style-*` rule. A stale boilerplate rule for a *different* slug also
/// matches: the point is to auto-refresh the selector name, not to protect
/// unedited boilerplate. It cannot tell an intentionally empty authored
/// rule from scaffold; that false positive is accepted.
pub fn looks_like_boilerplate(css: &str) -> bool {
    let trimmed = css.trim();
    trimmed.is_empty() || BOILERPLATE_RULE.is_match(trimmed)
}

/// Reconcile a CSS buffer with a freshly resolved slug.
///
/// Replaces the buffer with [`boilerplate`] when `force` is set or the
/// buffer still [`looks_like_boilerplate`]; otherwise the editor has real
/// authored content, which is never silently overwritten.
pub fn reconcile(slug: &str, current_css: &str, force: bool) -> String {
    if force || looks_like_boilerplate(current_css) {
        boilerplate(slug)
    } else {
        current_css.to_string()
    }
}
