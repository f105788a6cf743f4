use crate::error::TreeError;
use crate::tree::{DocumentTree, NodePattern};
use crate::utils::truncate_chars;
use std::sync::LazyLock;

/// Maximum review blocks collected
const MAX_REVIEWS: usize = 10;

/// Maximum characters kept from each review block
const MAX_REVIEW_CHARS: usize = 500;

/// Separator placed between review blocks
pub const REVIEW_SEPARATOR: &str = "\n---\n";

/// Review block patterns, highest priority first
static REVIEW_PATTERNS: LazyLock<Vec<NodePattern>> = LazyLock::new(|| {
    vec![
        NodePattern::attr_equals("data-hook", "review"),
        NodePattern::has_class("review"),
        NodePattern::class_contains("review-item"),
        NodePattern::class_contains("customer-review"),
        NodePattern::id_contains("reviews"),
    ]
});

/// Collects repeated review blocks
///
/// The first pattern that matches anything wins outright, even when it
/// yields fewer than ten blocks.
pub fn find<T: DocumentTree + ?Sized>(tree: &T) -> Result<Option<String>, TreeError> {
    for pattern in REVIEW_PATTERNS.iter() {
        let matches = tree.query(pattern)?;
        if matches.is_empty() {
            continue;
        }
        ::log::debug!("Review pattern {:?} matched {} nodes", pattern, matches.len());

        let mut reviews = Vec::with_capacity(matches.len().min(MAX_REVIEWS));
        for node in matches.into_iter().take(MAX_REVIEWS) {
            let text = tree.preferred_text(node)?;
            reviews.push(truncate_chars(&text, MAX_REVIEW_CHARS).to_string());
        }
        return Ok(Some(reviews.join(REVIEW_SEPARATOR)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HtmlTree;

    #[test]
    fn test_data_hook_has_highest_priority() {
        let html = concat!(
            "<html><body>",
            "<div class=\"review\">class review</div>",
            "<div data-hook=\"review\">hooked one</div>",
            "<div data-hook=\"review\">hooked two</div>",
            "</body></html>"
        );
        let tree = HtmlTree::parse("about:blank", html);

        let found = find(&tree).unwrap().unwrap();
        assert_eq!(found, "hooked one\n---\nhooked two");
    }

    #[test]
    fn test_winning_pattern_is_exclusive_even_when_underfilled() {
        let html = concat!(
            "<html><body><div id=\"customer-reviews\">",
            "<div class=\"review-item first\">alpha</div>",
            "<div class=\"customer-review\">beta</div>",
            "</div></body></html>"
        );
        let tree = HtmlTree::parse("about:blank", html);

        // review-item wins; customer-review and the reviews id never appear
        assert_eq!(find(&tree).unwrap().unwrap(), "alpha");
    }

    #[test]
    fn test_review_class_needs_exact_class() {
        let html = "<html><body><p class=\"reviewer\">not a review block</p></body></html>";
        let tree = HtmlTree::parse("about:blank", html);
        assert!(find(&tree).unwrap().is_none());
    }

    #[test]
    fn test_caps_count_and_length() {
        let blocks: String = (0..12)
            .map(|i| format!("<div class=\"review\">{}{}</div>", i % 10, "r".repeat(600)))
            .collect();
        let html = format!("<html><body>{}</body></html>", blocks);
        let tree = HtmlTree::parse("about:blank", &html);

        let found = find(&tree).unwrap().unwrap();
        let pieces: Vec<&str> = found.split(REVIEW_SEPARATOR).collect();
        assert_eq!(pieces.len(), 10);
        assert!(pieces.iter().all(|p| p.chars().count() == 500));
        assert!(pieces[9].starts_with('9'));
    }
}
