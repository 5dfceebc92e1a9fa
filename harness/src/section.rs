//! Section path resolution.
//!
//! Walks parent links in the catalog's section tree to build a fully
//! qualified path string. Pure lookup, no mutation, and infallible by
//! contract: any fetch error degrades the path instead of propagating.

use tracing::warn;

use catalog::{CatalogClient, SectionId};

/// Delimiter between section names in a resolved path.
pub const SECTION_DELIMITER: &str = " > ";

/// Bucket label for tests whose section cannot be determined at all.
pub const UNKNOWN_SECTION: &str = "Unknown Section";

/// Resolve a section id into a root-first path string.
///
/// Fetches each section record and advances to its parent until the
/// parent link is absent. A fetch error stops the walk at whatever
/// prefix was accumulated; when nothing was resolved the placeholder
/// `"Section {id}"` (or `"Section Unknown"` for a `None` input) is
/// returned. Always returns a non-empty string and never fails.
///
/// Termination relies on the catalog's section tree being acyclic;
/// each step consumes one parent link.
pub fn resolve_section_path(client: &dyn CatalogClient, section_id: Option<SectionId>) -> String {
    let mut names: Vec<String> = Vec::new();
    let mut current = section_id;
    while let Some(id) = current {
        match client.get_section(id) {
            Ok(section) => {
                names.insert(0, section.name);
                current = section.parent_id;
            }
            Err(err) => {
                warn!(section_id = id.0, error = %err, "error retrieving full section path");
                break;
            }
        }
    }
    if names.is_empty() {
        match current {
            Some(id) => format!("Section {id}"),
            None => "Section Unknown".to_string(),
        }
    } else {
        names.join(SECTION_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::fixture::{FixtureCatalog, FixtureData, SectionEntry};

    fn chain(depth: u64) -> FixtureCatalog {
        // Sections 1..=depth, each child of the previous; 1 is the root.
        let sections = (1..=depth)
            .map(|id| SectionEntry {
                id: SectionId(id),
                name: format!("S{id}"),
                parent_id: (id > 1).then(|| SectionId(id - 1)),
            })
            .collect();
        FixtureCatalog::from_data(FixtureData {
            sections,
            ..FixtureData::default()
        })
    }

    #[test]
    fn joins_full_chain_root_first() {
        let catalog = chain(3);
        let path = resolve_section_path(&catalog, Some(SectionId(3)));
        assert_eq!(path, "S1 > S2 > S3");
    }

    #[test]
    fn path_depth_matches_chain_depth() {
        let catalog = chain(5);
        let path = resolve_section_path(&catalog, Some(SectionId(5)));
        assert_eq!(path.split(SECTION_DELIMITER).count(), 5);
    }

    #[test]
    fn single_section_has_no_delimiter() {
        let catalog = chain(1);
        let path = resolve_section_path(&catalog, Some(SectionId(1)));
        assert_eq!(path, "S1");
    }

    #[test]
    fn failed_leaf_fetch_degrades_to_placeholder() {
        let catalog = chain(3).with_failing_section(SectionId(3));
        let path = resolve_section_path(&catalog, Some(SectionId(3)));
        assert_eq!(path, "Section 3");
    }

    #[test]
    fn missing_section_degrades_to_placeholder() {
        let catalog = chain(2);
        let path = resolve_section_path(&catalog, Some(SectionId(99)));
        assert_eq!(path, "Section 99");
    }

    #[test]
    fn mid_chain_failure_keeps_partial_path() {
        // Parent fetch fails; the already-resolved leaf-side names stay.
        let catalog = chain(3).with_failing_section(SectionId(1));
        let path = resolve_section_path(&catalog, Some(SectionId(3)));
        assert_eq!(path, "S2 > S3");
    }

    #[test]
    fn none_input_yields_unknown_placeholder() {
        let catalog = chain(1);
        let path = resolve_section_path(&catalog, None);
        assert_eq!(path, "Section Unknown");
    }
}
