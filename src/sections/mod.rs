pub mod container;
pub mod header;
pub mod reviews;


use crate::config::{SectionSpec, SectionStrategy};
use crate::error::TreeError;
use crate::tree::DocumentTree;

/// Runs the strategy chain configured for `spec`
///
/// The container finder only runs when the header finder comes back empty.
/// For review sections an empty or failing review scan is treated as a
/// miss so the keyword chain still gets its turn.
pub fn find_section<T: DocumentTree + ?Sized>(
    tree: &T,
    spec: &SectionSpec,
) -> Result<Option<String>, TreeError> {
    if spec.strategy == SectionStrategy::ReviewsFirst {
        match reviews::find(tree) {
            Ok(Some(found)) if !found.is_empty() => return Ok(Some(found)),
            Ok(_) => ::log::trace!("No review blocks for '{}'", spec.key),
            Err(e) => ::log::warn!("Review scan for '{}' failed: {}", spec.key, e),
        }
    }

    if let Some(found) = header::find(tree, &spec.keywords, spec.max_length)? {
        return Ok(Some(found));
    }
    ::log::trace!("No header match for '{}', trying containers", spec.key);
    container::find(tree, &spec.keywords, spec.max_length)
}
