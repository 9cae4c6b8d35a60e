/// Anchor for a heading: lower-cased, spaces replaced by hyphens.
///
/// Repeated headings map to the same anchor; no suffix is added.
pub fn slugify(text: &str) -> String {
    text.replace(' ', "-").to_lowercase()
}
