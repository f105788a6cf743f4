use crate::error::TreeError;
use crate::tree::{DocumentTree, NodePattern};
use crate::utils::{char_len, preview, truncate_chars};
use std::sync::LazyLock;

/// Maximum next-siblings collected after a matched header
const MAX_SIBLINGS: usize = 10;

/// Maximum ancestor levels tried when siblings yield too little
const MAX_ANCESTORS: usize = 3;

/// Sibling content shorter than this triggers the ancestor fallback
const ANCESTOR_FALLBACK_BELOW: usize = 100;

/// Trimmed content must be longer than this to be accepted
const ACCEPT_ABOVE: usize = 50;

/// Tags and class/id hints that mark a node as a probable section label
static HEADER_PATTERN: LazyLock<NodePattern> = LazyLock::new(|| {
    let tags = ["h1", "h2", "h3", "h4", "h5", "h6", "strong", "b", "span", "div"];
    let mut patterns: Vec<NodePattern> = tags.into_iter().map(NodePattern::tag).collect();
    for hint in ["title", "heading", "label", "Title", "Heading", "Label"] {
        patterns.push(NodePattern::class_contains(hint));
        patterns.push(NodePattern::id_contains(hint));
    }
    NodePattern::AnyOf(patterns)
});

/// Finds a section by locating a header whose text matches a keyword and
/// harvesting the text that follows it
///
/// Headers are tried in document order. The first one whose harvested
/// content passes the acceptance threshold wins; rejected headers do not
/// stop the scan.
pub fn find<T: DocumentTree + ?Sized>(
    tree: &T,
    keywords: &[String],
    max_length: usize,
) -> Result<Option<String>, TreeError> {
    for header in tree.query(&HEADER_PATTERN)? {
        let text = tree.text_content(header)?.to_lowercase();
        if !keywords.iter().any(|k| text.contains(k.as_str())) {
            continue;
        }
        ::log::trace!("Header candidate for {:?}: {}", keywords.first(), preview(&text));

        let content = harvest(tree, header, max_length)?;
        let trimmed = content.trim();
        if char_len(trimmed) > ACCEPT_ABOVE {
            ::log::debug!(
                "Header harvest accepted {} chars for {:?}",
                char_len(trimmed),
                keywords.first()
            );
            return Ok(Some(truncate_chars(trimmed, max_length).to_string()));
        }
    }
    Ok(None)
}

/// Collects sibling text after `header`, falling back to an ancestor's
/// text when the siblings are too sparse
fn harvest<T: DocumentTree + ?Sized>(
    tree: &T,
    header: T::Node,
    max_length: usize,
) -> Result<String, TreeError> {
    let mut content = String::new();
    let mut content_len = 0;

    let mut sibling = tree.next_sibling(header);
    let mut attempts = 0;
    while let Some(node) = sibling {
        if attempts >= MAX_SIBLINGS || content_len >= max_length {
            break;
        }
        let text = tree.preferred_text(node)?;
        if !text.trim().is_empty() {
            content_len += char_len(&text) + 1;
            content.push_str(&text);
            content.push('\n');
        }
        sibling = tree.next_sibling(node);
        attempts += 1;
    }

    if content_len < ANCESTOR_FALLBACK_BELOW {
        let mut ancestor = tree.parent(header);
        let mut levels = 0;
        while let Some(node) = ancestor {
            if levels >= MAX_ANCESTORS {
                break;
            }
            let text = tree.preferred_text(node)?;
            let text_len = char_len(&text);
            if text_len > content_len && text_len < max_length.saturating_mul(2) {
                ::log::trace!("Ancestor {} supplied {} chars", tree.tag_name(node), text_len);
                return Ok(text);
            }
            ancestor = tree.parent(node);
            levels += 1;
        }
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HtmlTree;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_harvest_stops_at_sibling_limit() {
        let paragraphs: String = (0..15)
            .map(|i| format!("<p>paragraph number {:02}</p>", i))
            .collect();
        let html = format!("<html><body><h2>Highlights</h2>{}</body></html>", paragraphs);
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree, &keywords(&["highlights"]), 4000).unwrap().unwrap();
        assert!(found.starts_with("paragraph number 00\n"));
        assert!(found.ends_with("paragraph number 09"));
        assert!(!found.contains("number 10"));
    }

    #[test]
    fn test_harvest_stops_once_max_length_reached() {
        let html = format!(
            "<html><body><h3>Features</h3><p>{}</p><p>{}</p></body></html>",
            "a".repeat(80),
            "b".repeat(80)
        );
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree, &keywords(&["features"]), 60).unwrap().unwrap();
        assert_eq!(found, "a".repeat(60));
    }

    #[test]
    fn test_skips_whitespace_only_siblings() {
        let body = "c".repeat(120);
        let html = format!(
            "<html><body><h2>Details</h2><p>   </p><div>\n</div><p>{}</p></body></html>",
            body
        );
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree, &keywords(&["details"]), 4000).unwrap().unwrap();
        assert_eq!(found, body);
    }

    #[test]
    fn test_ancestor_fallback_takes_first_fitting_ancestor() {
        // The list sits inside the header, so siblings yield nothing
        let item = "Great battery life and a bright screen for outdoor use.";
        let html = format!(
            "<html><body><article><section><strong>Key features</strong></section><ul><li>{}</li></ul></article></body></html>",
            item
        );
        let tree = HtmlTree::parse("about:blank", &html);

        // strong -> section ("Key features", 12 chars) is the first ancestor
        // longer than the empty sibling content, so it wins even though the
        // article would have been a better pick
        let found = find(&tree, &keywords(&["key features"]), 4000).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_ancestor_fallback_adopts_enclosing_section() {
        let html = format!(
            "<html><body><section><h4>Weight</h4><p>{}</p></section></body></html>",
            "w".repeat(60)
        );
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree, &keywords(&["weight"]), 60).unwrap().unwrap();
        assert_eq!(found, format!("Weight{}", "w".repeat(54)));
    }

    #[test]
    fn test_ancestor_fallback_respects_upper_bound() {
        let html = format!(
            "<html><body><section><h4>Weight</h4><p>{}</p><p>{}</p></section></body></html>",
            "w".repeat(60),
            "v".repeat(100)
        );
        let tree = HtmlTree::parse("about:blank", &html);

        // Every ancestor is at least 2x the limit, so the sibling text stays
        let found = find(&tree, &keywords(&["weight"]), 60).unwrap().unwrap();
        assert_eq!(found, "w".repeat(60));
    }

    #[test]
    fn test_huge_max_length_does_not_overflow() {
        let html = "<html><body><section><h4>Weight</h4><p>short</p></section></body></html>";
        let tree = HtmlTree::parse("about:blank", html);

        // The section is adopted ("Weightshort") but stays under the threshold
        let found = find(&tree, &keywords(&["weight"]), usize::MAX).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_class_label_hint_marks_header() {
        let body = "z".repeat(120);
        let html = format!(
            "<html><body><p class=\"section-label\">Warranty</p><p>{}</p></body></html>",
            body
        );
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree, &keywords(&["warranty"]), 2000).unwrap();
        assert_eq!(found, Some(body));
    }

    #[test]
    fn test_capitalized_id_hints_mark_header() {
        let body = "t".repeat(120);
        for id in ["warrantyLabel", "productTitle", "specHeading"] {
            let html = format!(
                "<html><body><p id=\"{}\">Warranty</p><p>{}</p></body></html>",
                id, body
            );
            let tree = HtmlTree::parse("about:blank", &html);

            let found = find(&tree, &keywords(&["warranty"]), 2000).unwrap();
            assert_eq!(found.as_deref(), Some(body.as_str()), "id {}", id);
        }
    }

    #[test]
    fn test_span_container_marks_header() {
        let body = "s".repeat(120);
        let html = format!(
            "<html><body><span>Product details</span><p>{}</p></body></html>",
            body
        );
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree, &keywords(&["product details"]), 4000).unwrap();
        assert_eq!(found, Some(body));
    }

    #[test]
    fn test_plain_paragraph_is_not_a_header() {
        let html = format!(
            "<html><body><p>Warranty</p><p>{}</p></body></html>",
            "n".repeat(120)
        );
        let tree = HtmlTree::parse("about:blank", &html);

        assert!(find(&tree, &keywords(&["warranty"]), 2000).unwrap().is_none());
    }
}
