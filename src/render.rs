use pulldown_cmark::{CowStr, Event, LinkType, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape::{escape_href, escape_html};

use crate::parser;
use crate::slug::slugify;
use crate::tree::{Document, Node};

/// Render markdown to an HTML fragment.
///
/// Headings without an explicit `{#id}` get one from [`slugify`], and links
/// leaving the document open in a new browsing context.
pub fn markdown_to_html(markdown: &str) -> String {
    let slugs: Vec<String> = parser::parse(markdown)
        .headings()
        .into_iter()
        .map(|(_, text)| slugify(&text))
        .collect();
    let events = with_heading_ids(Parser::new_ext(markdown, parser::render_options()), slugs);

    let mut image_depth = 0usize;
    let events = events.map(|event| match event {
        Event::Start(Tag::Image { .. }) => {
            image_depth += 1;
            event
        }
        Event::End(TagEnd::Image) => {
            image_depth = image_depth.saturating_sub(1);
            event
        }
        // Alt text is written raw, so leave links inside images alone
        event if image_depth > 0 => event,
        event => open_in_new_context(event),
    });

    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

/// Render markdown to a complete HTML page.
///
/// The page title is the first level 1 heading, or `fallback_title` when
/// there is none.
pub fn markdown_to_html_page(markdown: &str, fallback_title: &str) -> String {
    let doc = parser::parse(markdown);
    let title = document_title(&doc);
    let title = title.as_deref().unwrap_or(fallback_title);
    html_page(title, &markdown_to_html(markdown))
}

/// Text of the first level 1 heading, if it has any.
pub fn document_title(doc: &Document) -> Option<String> {
    let mut title = None;
    doc.walk(&mut |node| {
        if title.is_none() {
            if let Node::Heading { level: 1, .. } = node {
                let text = node.text().trim().to_string();
                if !text.is_empty() {
                    title = Some(text);
                }
            }
        }
    });
    title
}

fn html_page(title: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    let _ = escape_html(&mut out, title);
    out.push_str("</title>\n</head>\n<body>\n");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}

/// Give every heading without an explicit id the next slug.
///
/// Slugs come from the literal heading text in document order, so they match
/// the table of contents even when the rendered text is smartened.
fn with_heading_ids<'a>(
    events: impl Iterator<Item = Event<'a>>,
    slugs: Vec<String>,
) -> impl Iterator<Item = Event<'a>> {
    let mut slugs = slugs.into_iter();
    events.map(move |mut event| {
        if let Event::Start(Tag::Heading { id, .. }) = &mut event {
            let slug = slugs.next().unwrap_or_default();
            if id.is_none() && !slug.is_empty() {
                *id = Some(CowStr::from(slug));
            }
        }
        event
    })
}

/// Rewrite the opening tag of an absolute link to carry `target="_blank"`.
fn open_in_new_context(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            ..
        }) if !is_relative_link(&dest_url) => {
            let mut tag = String::from("<a href=\"");
            if matches!(link_type, LinkType::Email) {
                tag.push_str("mailto:");
            }
            let _ = escape_href(&mut tag, &dest_url);
            if !title.is_empty() {
                tag.push_str("\" title=\"");
                let _ = escape_html(&mut tag, &title);
            }
            tag.push_str("\" target=\"_blank\">");
            // The writer closes links with a plain `</a>` on the end tag
            Event::InlineHtml(CowStr::from(tag))
        }
        other => other,
    }
}

fn is_relative_link(url: &str) -> bool {
    url.starts_with('#')
        || (url.starts_with('/') && !url.starts_with("//"))
        || url.starts_with("./")
        || url.starts_with("../")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::{TOC_MARKER, insert_toc};

    #[test]
    fn heading_gets_slug_id() {
        assert_eq!(
            markdown_to_html("# Hello World"),
            "<h1 id=\"hello-world\">Hello World</h1>\n"
        );
    }

    #[test]
    fn explicit_heading_id_is_kept() {
        assert_eq!(
            markdown_to_html("## Intro {#start}"),
            "<h2 id=\"start\">Intro</h2>\n"
        );
    }

    #[test]
    fn heading_id_ignores_nested_text() {
        assert_eq!(
            markdown_to_html("# Hello *there*"),
            "<h1 id=\"hello-\">Hello <em>there</em></h1>\n"
        );
    }

    #[test]
    fn heading_id_uses_literal_text_while_body_is_smartened() {
        assert_eq!(
            markdown_to_html("# Wait -- what..."),
            "<h1 id=\"wait---what...\">Wait – what…</h1>\n"
        );
    }

    #[test]
    fn smartened_heading_still_matches_its_toc_link() {
        let markdown = insert_toc("{{.TOC}}\n# Wait -- what\n", TOC_MARKER);
        assert!(markdown.starts_with("- [Wait -- what](#wait---what)\n"));
        let html = markdown_to_html(&markdown);
        assert!(html.contains("<a href=\"#wait---what\">Wait – what</a>"));
        assert!(html.contains("<h1 id=\"wait---what\">Wait – what</h1>"));
    }

    #[test]
    fn explicit_id_still_consumes_its_slug() {
        let html = markdown_to_html("# One {#first}\n# Two -- b\n");
        assert!(html.contains("<h1 id=\"first\">One</h1>"));
        assert!(html.contains("<h1 id=\"two---b\">Two – b</h1>"));
    }

    #[test]
    fn fragment_links_stay_in_document() {
        assert_eq!(
            markdown_to_html("[x](#a)"),
            "<p><a href=\"#a\">x</a></p>\n"
        );
    }

    #[test]
    fn absolute_links_open_in_new_context() {
        assert_eq!(
            markdown_to_html("[x](https://example.com/?a=1&b=2)"),
            "<p><a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\">x</a></p>\n"
        );
    }

    #[test]
    fn link_title_is_kept() {
        assert_eq!(
            markdown_to_html("[x](https://example.com \"The <Title>\")"),
            "<p><a href=\"https://example.com\" title=\"The &lt;Title&gt;\" target=\"_blank\">x</a></p>\n"
        );
    }

    #[test]
    fn relative_paths_are_not_rewritten() {
        let html = markdown_to_html("[a](/root) [b](./here) [c](../up) [d](//cdn.example.com)");
        assert!(html.contains("<a href=\"/root\">a</a>"));
        assert!(html.contains("<a href=\"./here\">b</a>"));
        assert!(html.contains("<a href=\"../up\">c</a>"));
        assert!(html.contains("<a href=\"//cdn.example.com\" target=\"_blank\">d</a>"));
    }

    #[test]
    fn email_autolink() {
        assert_eq!(
            markdown_to_html("<me@example.com>"),
            "<p><a href=\"mailto:me@example.com\" target=\"_blank\">me@example.com</a></p>\n"
        );
    }

    #[test]
    fn toc_links_resolve_to_heading_ids() {
        let markdown = insert_toc("{{.TOC}}\n# Title\n## Sub Section\n", TOC_MARKER);
        let html = markdown_to_html(&markdown);
        assert!(html.contains("<a href=\"#title\">Title</a>"));
        assert!(html.contains("<a href=\"#sub-section\">Sub Section</a>"));
        assert!(html.contains("<h1 id=\"title\">"));
        assert!(html.contains("<h2 id=\"sub-section\">"));
    }

    #[test]
    fn tables_and_strikethrough_are_enabled() {
        let html = markdown_to_html("| A | B |\n|---|---|\n| 1 | ~~2~~ |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>2</del>"));
    }

    #[test]
    fn page_uses_first_h1_as_title() {
        let page = markdown_to_html_page("## Aside\n# Report <1>\n", "fallback");
        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<title>Report &lt;1&gt;</title>"));
        assert!(page.contains("<h2 id=\"aside\">Aside</h2>"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn page_falls_back_to_given_title() {
        let page = markdown_to_html_page("no headings", "notes");
        assert!(page.contains("<title>notes</title>"));
        assert!(page.contains("<p>no headings</p>"));
    }
}
