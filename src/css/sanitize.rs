//! Markup stripping for persisted and published CSS.

/// Strip disallowed markup from a CSS buffer.
///
/// Removes HTML tag constructs (anything from a `<` that opens a tag,
/// meaning a letter, `/`, `!` or `?` follows, through the closing `>`) and
/// trims the result. Ordinary CSS passes through unchanged apart from the outer
/// trim: `>` combinators are untouched, and a lone `<` not followed by a
/// tag name is kept as-is. An unterminated tag is dropped to end of input.
pub fn strip_disallowed_markup(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '<' {
            match chars.peek() {
                Some(&next)
                    if next.is_ascii_alphabetic()
                        || next == '/'
                        || next == '!'
                        || next == '?' =>
                {
                    // Skip the whole tag construct.
                    for skipped in chars.by_ref() {
                        if skipped == '>' {
                            break;
                        }
                    }
                }
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }

    out.trim().to_string()
}
