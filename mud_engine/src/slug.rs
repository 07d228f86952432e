/// Normalize a user-provided save slot name into a filesystem-safe slug.
///
/// Persian letters are kept, so a slot can be named in the practice language.
pub fn sanitize_slug(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "save".to_string();
    }

    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in trimmed.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.extend(ch.to_lowercase());
            pending_dash = false;
        } else if ch == '-' || ch == '_' {
            if !slug.is_empty() {
                slug.push(ch);
            }
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    let trimmed = slug.trim_matches(&['-', '_'][..]).to_string();
    if trimmed.is_empty() { "save".to_string() } else { trimmed }
}
