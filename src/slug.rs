//! Display-name sanitization and slug derivation

/// Longest display name the leaderboard will store
const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// Sanitize a user-provided display name
///
/// Strips control characters, collapses whitespace runs to single spaces,
/// trims, and caps the length. The result may still be too short to accept;
/// the service enforces the minimum length.
pub fn sanitize_display_name(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_DISPLAY_NAME_CHARS).collect()
}

/// Derive a URL-safe slug from a sanitized display name
///
/// Lowercases and maps every run of non-alphanumeric characters to a single
/// dash, with no leading or trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
