use crate::error::TreeError;
use crate::tree::{DocumentTree, NodePattern};
use crate::utils::{char_len, truncate_chars};
use regex::Regex;
use std::sync::LazyLock;

/// Container text must be longer than this to be accepted
const ACCEPT_ABOVE: usize = 100;

static NON_LOWERCASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[^a-z]").expect("Token pattern should be valid")
});

/// Reduces a keyword phrase to the bare lowercase token matched against
/// class and id attributes, e.g. "what's in the box" -> "whatsinthebox"
pub fn bare_token(keyword: &str) -> String {
    NON_LOWERCASE.replace_all(keyword, "").into_owned()
}

/// Finds a section by matching keyword tokens against class and id names
///
/// Keywords are tried in order; for each one the first container in
/// document order whose text length lies strictly between 100 and
/// `2 * max_length` is returned.
pub fn find<T: DocumentTree + ?Sized>(
    tree: &T,
    keywords: &[String],
    max_length: usize,
) -> Result<Option<String>, TreeError> {
    for keyword in keywords {
        let token = bare_token(keyword);
        if token.is_empty() {
            continue;
        }
        let pattern = NodePattern::AnyOf(vec![
            NodePattern::ClassContains(token.clone()),
            NodePattern::IdContains(token.clone()),
        ]);

        for container in tree.query(&pattern)? {
            let text = tree.preferred_text(container)?;
            let text_len = char_len(&text);
            if text_len > ACCEPT_ABOVE && text_len < max_length.saturating_mul(2) {
                ::log::debug!(
                    "Container {} (class {:?}) matched token '{}'",
                    tree.tag_name(container),
                    tree.class_name(container).unwrap_or_default(),
                    token
                );
                return Ok(Some(truncate_chars(&text, max_length).to_string()));
            }
        }
    }
    Ok(None)
}
