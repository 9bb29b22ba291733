//! Slug derivation for style variations.
//!
//! A slug is the canonical, CSS-safe name of a style. It is derived from a
//! human-entered title or slug field and feeds both the editor class
//! (`is-style-<slug>`) and the CSS selector (`.is-style-<slug>`).

/// Normalize arbitrary input into a CSS-safe slug.
///
/// Trims, lowercases, replaces every maximal run of characters outside
/// `[a-z0-9_-]` with a single hyphen, then strips leading and trailing
/// hyphens. Total over all inputs; empty input yields an empty slug.
pub fn slugify(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_run = false;

    for ch in lowered.chars() {
        if matches!(ch, 'a'..='z' | '0'..='9' | '_' | '-') {
            slug.push(ch);
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }

    slug.trim_matches('-').to_string()
}

/// Resolve the canonical slug from its possible sources.
///
/// First non-empty source wins: the explicit slug from the editing surface,
/// then the slug stored by a prior save, then the title. The winning source
/// is normalized through [`slugify`], so the result is always a valid CSS
/// class fragment. All-empty sources yield an empty slug, which callers
/// treat as "no style class yet" rather than an error.
pub fn resolve_slug(title: &str, explicit_slug: &str, stored_slug: &str) -> String {
    let source = if !explicit_slug.is_empty() {
        explicit_slug
    } else if !stored_slug.is_empty() {
        stored_slug
    } else {
        title
    };

    slugify(source)
}

/// The editor class for a slug: `is-style-<slug>`, empty for an empty slug.
pub fn style_class(slug: &str) -> String {
    if slug.is_empty() {
        String::new()
    } else {
        format!("is-style-{slug}")
    }
}

/// Human-readable class preview for list screens and the editor.
///
/// Falls back to the literal `is-style-{slug}` placeholder when no slug has
/// been derived yet. Cosmetic only; never a source of truth.
pub fn preview_class(slug: &str) -> String {
    if slug.is_empty() {
        "is-style-{slug}".to_string()
    } else {
        format!("is-style-{slug}")
    }
}
