use crate::slug::slugify;
use crate::tree::{Document, Node};

/// Placeholder replaced by the generated table of contents.
pub const TOC_MARKER: &str = "{{.TOC}}";

/// Deepest heading level listed in the table of contents.
pub const MAX_TOC_LEVEL: u8 = 3;

/// Build the table of contents for a parsed document as a markdown list.
///
/// Each heading up to [`MAX_TOC_LEVEL`] becomes `- [text](#anchor)`, indented by
/// two spaces per level below 1. The block ends with a blank line.
pub fn generate_toc(doc: &Document) -> String {
    let mut out = String::new();

    doc.walk(&mut |node| {
        if let Node::Heading { level, .. } = node {
            if *level > MAX_TOC_LEVEL {
                return;
            }
            let text = node.text();
            let anchor = slugify(&text);
            out.push_str(&"  ".repeat(usize::from(*level - 1)));
            out.push_str(&format!("- [{text}](#{anchor})\n"));
        }
    });

    out.push('\n');
    out
}

/// Replace the first occurrence of `marker` in `markdown` with its table of
/// contents. Without a marker the input comes back untouched.
pub fn insert_toc(markdown: &str, marker: &str) -> String {
    if marker.is_empty() || !markdown.contains(marker) {
        return markdown.to_string();
    }
    let doc = crate::parser::parse(markdown);
    markdown.replacen(marker, &generate_toc(&doc), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn toc(markdown: &str) -> String {
        generate_toc(&parse(markdown))
    }

    #[test]
    fn title_and_subsection() {
        let result = insert_toc("# Title\n## Sub Section\n{{.TOC}}\nbody", TOC_MARKER);
        assert_eq!(
            result,
            "# Title\n## Sub Section\n- [Title](#title)\n  - [Sub Section](#sub-section)\n\n\nbody"
        );
    }

    #[test]
    fn indentation_follows_level() {
        assert_eq!(
            toc("# One\n## Two\n### Three"),
            "- [One](#one)\n  - [Two](#two)\n    - [Three](#three)\n\n"
        );
    }

    #[test]
    fn deep_headings_are_skipped() {
        assert_eq!(
            toc("# One\n#### Four\n##### Five\n###### Six\n## Two"),
            "- [One](#one)\n  - [Two](#two)\n\n"
        );
    }

    #[test]
    fn no_headings_yields_blank_line() {
        assert_eq!(toc("just text"), "\n");
    }

    #[test]
    fn missing_marker_leaves_input_unchanged() {
        let input = "# Title\n\nno marker here\n";
        assert_eq!(insert_toc(input, TOC_MARKER), input);
    }

    #[test]
    fn only_first_marker_is_replaced() {
        let result = insert_toc("# A\n\n{{.TOC}}\n\n{{.TOC}}\n", TOC_MARKER);
        assert_eq!(result, "# A\n\n- [A](#a)\n\n\n\n{{.TOC}}\n");
    }

    #[test]
    fn surrounding_content_is_preserved() {
        let before = "Intro *with* `markup` & ümlauts\n\n# Heading\n\n";
        let after = "\n\n```\ncode {{.TOC}}?\n```\ntrailing";
        let input = format!("{before}{TOC_MARKER}{after}");
        let result = insert_toc(&input, TOC_MARKER);
        assert!(result.starts_with(before));
        assert!(result.ends_with(after));
        assert_eq!(
            &result[before.len()..result.len() - after.len()],
            "- [Heading](#heading)\n\n"
        );
    }

    #[test]
    fn heading_punctuation_stays_literal() {
        assert_eq!(
            insert_toc("# Don't -- Panic\n{{.TOC}}\n", TOC_MARKER),
            "# Don't -- Panic\n- [Don't -- Panic](#don't---panic)\n\n\n"
        );
        assert_eq!(
            toc("## Say \"hi\"..."),
            "  - [Say \"hi\"...](#say-\"hi\"...)\n\n"
        );
    }

    #[test]
    fn duplicate_headings_share_an_anchor() {
        assert_eq!(
            toc("## Notes\n## Notes"),
            "  - [Notes](#notes)\n  - [Notes](#notes)\n\n"
        );
    }

    #[test]
    fn marker_inside_heading_text_is_listed_before_substitution() {
        // The TOC is computed from the document as written, marker included.
        let result = insert_toc("# {{.TOC}}\n", TOC_MARKER);
        assert!(result.starts_with("# - [{{.TOC}}](#{{.toc}})\n"));
    }
}
