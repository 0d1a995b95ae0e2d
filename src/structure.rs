// ABOUTME: Deck outline derived from composited pages
// ABOUTME: Groups page indices under the h1/h2/h3 sections they belong to

use crate::compositor::Page;
use serde::Serialize;

/// One section heading and the pages that fall under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub content: String,
    pub page_ids: Vec<usize>,
}

/// Headings in effect after a page was processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub h1: Option<String>,
    pub h2: Option<String>,
    pub h3: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlideStructure {
    pub page_meta: Vec<PageMeta>,
    pub headings: Vec<HeadingEntry>,
}

fn non_empty(h: &Option<String>) -> Option<&str> {
    h.as_deref().filter(|s| !s.is_empty())
}

/// Builds the outline of a deck from its (inherited) pages.
pub fn retrieve_structure(pages: &[Page]) -> SlideStructure {
    let mut current = PageMeta::default();
    let mut last_idx: [Option<usize>; 3] = [None; 3];
    let mut structure = SlideStructure::default();

    for (i, page) in pages.iter().enumerate() {
        let (h1, h2, h3) = (non_empty(&page.h1), non_empty(&page.h2), non_empty(&page.h3));

        if let Some(h1) = h1.filter(|h| current.h1.as_deref() != Some(*h)) {
            current = PageMeta {
                h1: Some(h1.to_string()),
                ..PageMeta::default()
            };
            last_idx[0] = Some(structure.headings.len());
            structure.headings.push(entry(1, h1));
        }
        if let Some(h2) = h2.filter(|h| current.h2.as_deref() != Some(*h)) {
            current.h2 = Some(h2.to_string());
            current.h3 = None;
            last_idx[1] = Some(structure.headings.len());
            structure.headings.push(entry(2, h2));
        }
        if let Some(h3) = h3.filter(|h| current.h3.as_deref() != Some(*h)) {
            current.h3 = Some(h3.to_string());
            last_idx[2] = Some(structure.headings.len());
            structure.headings.push(entry(3, h3));
        }

        let memberships = [
            h1.is_some() || h2.is_some() || h3.is_some(),
            h2.is_some() || h3.is_some(),
            h3.is_some(),
        ];
        for (level, member) in memberships.into_iter().enumerate() {
            if let (true, Some(idx)) = (member, last_idx[level]) {
                structure.headings[idx].page_ids.push(i);
            }
        }

        structure.page_meta.push(current.clone());
    }

    structure
}

fn entry(level: u8, content: &str) -> HeadingEntry {
    HeadingEntry {
        level,
        content: content.to_string(),
        page_ids: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::composite;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_retrieve_structure() {
        let doc = "# Title\np0\n## Heading1\np1\n### Heading1.1\np2\n## Heading2\n### Heading2.1\np3\n";
        let pages = composite(doc).unwrap();
        let structure = retrieve_structure(&pages);

        assert_eq!(
            structure.headings,
            vec![
                HeadingEntry { level: 1, content: "Title".into(), page_ids: vec![0, 1, 2, 3] },
                HeadingEntry { level: 2, content: "Heading1".into(), page_ids: vec![1, 2] },
                HeadingEntry { level: 3, content: "Heading1.1".into(), page_ids: vec![2] },
                HeadingEntry { level: 2, content: "Heading2".into(), page_ids: vec![3] },
                HeadingEntry { level: 3, content: "Heading2.1".into(), page_ids: vec![3] },
            ]
        );
        assert_eq!(structure.page_meta.len(), 4);
        assert_eq!(structure.page_meta[2].h3.as_deref(), Some("Heading1.1"));
        assert_eq!(structure.page_meta[3].h2.as_deref(), Some("Heading2"));
        assert_eq!(structure.page_meta[3].h3.as_deref(), Some("Heading2.1"));
    }

    #[test]
    fn test_untitled_pages_have_no_membership() {
        let pages = composite("intro\n---\nmore").unwrap();
        let structure = retrieve_structure(&pages);
        assert!(structure.headings.is_empty());
        assert_eq!(structure.page_meta, vec![PageMeta::default(), PageMeta::default()]);
    }
}
