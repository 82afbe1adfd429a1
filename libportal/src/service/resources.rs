//! Resource library search

use crate::sample;
use crate::types::{Resource, ResourceKind};

pub struct ResourceLibrary {
    items: Vec<Resource>,
}

impl Default for ResourceLibrary {
    fn default() -> Self {
        Self::new(sample::resources())
    }
}

impl ResourceLibrary {
    pub fn new(items: Vec<Resource>) -> Self {
        Self { items }
    }

    pub fn all(&self) -> &[Resource] {
        &self.items
    }

    /// Case-insensitive match on title, description or subject
    ///
    /// An empty query matches everything; `kind` narrows to one tab.
    pub fn search(&self, query: &str, kind: Option<ResourceKind>) -> Vec<&Resource> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .filter(|r| {
                query.is_empty()
                    || r.title.to_lowercase().contains(&query)
                    || r.description.to_lowercase().contains(&query)
                    || r.subject.to_lowercase().contains(&query)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(resources: Vec<&Resource>) -> Vec<u32> {
        resources.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let library = ResourceLibrary::default();
        assert_eq!(library.search("", None).len(), 5);
        assert_eq!(library.search("   ", None).len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let library = ResourceLibrary::default();
        // Title and description
        assert_eq!(ids(library.search("FRACTIONS", None)), vec![1, 4]);
        // Subject only
        assert_eq!(ids(library.search("english", None)), vec![3]);
    }

    #[test]
    fn test_search_by_kind() {
        let library = ResourceLibrary::default();
        assert_eq!(ids(library.search("", Some(ResourceKind::Document))), vec![1, 2, 3]);
        assert_eq!(ids(library.search("math", Some(ResourceKind::Video))), vec![4]);
        assert!(library.search("math", Some(ResourceKind::Interactive)).is_empty());
    }

    #[test]
    fn test_no_match() {
        let library = ResourceLibrary::default();
        assert!(library.search("chemistry", None).is_empty());
    }
}
