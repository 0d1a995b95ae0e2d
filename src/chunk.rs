// ABOUTME: Layout tree built from a page body
// ABOUTME: Splits on vertical `___` then horizontal `***` dividers outside fenced code

use crate::md_helper::{is_divider, is_fence_marker, DividerKind};
use serde::Serialize;

/// Stacking direction of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Divider line that separates the children of a branch in this direction.
    pub fn divider(self) -> DividerKind {
        match self {
            Direction::Horizontal => DividerKind::Horizontal,
            Direction::Vertical => DividerKind::Vertical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

/// A node of a page's layout tree.
///
/// A leaf holds non-empty trimmed text (only the root of an empty body is
/// blank) and a branch always holds at least two children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Chunk {
    Leaf {
        paragraph: String,
    },
    Branch {
        direction: Direction,
        children: Vec<Chunk>,
    },
}

impl Chunk {
    pub fn leaf(paragraph: impl Into<String>) -> Self {
        Chunk::Leaf {
            paragraph: paragraph.into(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Chunk::Leaf { .. })
    }

    pub fn paragraph(&self) -> Option<&str> {
        match self {
            Chunk::Leaf { paragraph } => Some(paragraph.as_str()),
            Chunk::Branch { .. } => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Chunk::Leaf { .. } => None,
            Chunk::Branch { direction, .. } => Some(*direction),
        }
    }

    pub fn children(&self) -> &[Chunk] {
        match self {
            Chunk::Leaf { .. } => &[],
            Chunk::Branch { children, .. } => children.as_slice(),
        }
    }

    /// Leaf texts in tree order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Chunk::Leaf { paragraph } => out.push(paragraph.as_str()),
            Chunk::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Reassembles markdown from the tree, putting divider lines back
    /// between the children of each branch.
    pub fn to_markdown(&self) -> String {
        match self {
            Chunk::Leaf { paragraph } => paragraph.clone(),
            Chunk::Branch {
                direction,
                children,
            } => {
                let marker = direction.divider().marker().to_string().repeat(3);
                children
                    .iter()
                    .map(Chunk::to_markdown)
                    .collect::<Vec<_>>()
                    .join(format!("\n{}\n", marker).as_str())
            }
        }
    }
}

/// Builds the layout tree for a page body.
///
/// Vertical dividers split first; each vertical region is then split on
/// horizontal dividers. A region with a single segment stays a leaf, and a
/// body without vertical dividers is returned without a vertical wrapper.
pub fn build_chunk_tree(body: &str) -> Chunk {
    let mut regions: Vec<Chunk> = split_by_divider(body, DividerKind::Vertical)
        .into_iter()
        .map(|region| {
            let columns = split_by_divider(&region, DividerKind::Horizontal);
            if columns.len() > 1 {
                Chunk::Branch {
                    direction: Direction::Horizontal,
                    children: columns.into_iter().map(Chunk::leaf).collect(),
                }
            } else {
                Chunk::leaf(region)
            }
        })
        .collect();

    match regions.len() {
        // an empty body still yields a (blank) leaf root
        0 => Chunk::leaf(""),
        1 => regions.remove(0),
        _ => Chunk::Branch {
            direction: Direction::Vertical,
            children: regions,
        },
    }
}

/// Splits text on divider lines of one kind, ignoring dividers inside fenced
/// regions. Segments are trimmed and empty ones dropped.
pub fn split_by_divider(text: &str, kind: DividerKind) -> Vec<String> {
    let mut segments = vec![String::new()];
    let mut escaped = false;
    for line in text.split('\n') {
        if is_fence_marker(line) {
            escaped = !escaped;
        }
        if !escaped && is_divider(line, Some(kind)) {
            segments.push(String::new());
        } else if let Some(current) = segments.last_mut() {
            current.push_str(line);
            current.push('\n');
        }
    }
    segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_body_is_a_leaf() {
        assert_eq!(build_chunk_tree("Just text\n\nmore"), Chunk::leaf("Just text\n\nmore"));
    }

    #[test]
    fn test_vertical_split() {
        let tree = build_chunk_tree("Paragraph 1\n___\n\nParagraph 2");
        assert_eq!(
            tree,
            Chunk::Branch {
                direction: Direction::Vertical,
                children: vec![Chunk::leaf("Paragraph 1"), Chunk::leaf("Paragraph 2")],
            }
        );
    }

    #[test]
    fn test_horizontal_root_without_vertical_wrapper() {
        let tree = build_chunk_tree("A\n***\nB\n***\nC");
        assert_eq!(tree.direction(), Some(Direction::Horizontal));
        assert_eq!(tree.leaves(), vec!["A", "B", "C"]);
        assert!(tree.children().iter().all(Chunk::is_leaf));
    }

    #[test]
    fn test_nested_split() {
        let tree = build_chunk_tree("Header\n___\nLeft\n***\nRight\n___\nFooter");
        assert_eq!(tree.direction(), Some(Direction::Vertical));
        let children = tree.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].paragraph(), Some("Header"));
        assert_eq!(children[1].direction(), Some(Direction::Horizontal));
        assert_eq!(children[1].leaves(), vec!["Left", "Right"]);
        assert_eq!(children[2].paragraph(), Some("Footer"));
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let tree = build_chunk_tree("___\nOnly\n___\n\n___");
        assert_eq!(tree, Chunk::leaf("Only"));
    }

    #[test]
    fn test_dividers_inside_fence_are_ignored() {
        let body = "```\n___\n***\n```\nAfter";
        assert_eq!(build_chunk_tree(body), Chunk::leaf(body));
    }

    #[test]
    fn test_fence_tracking_resets_per_region() {
        let tree = build_chunk_tree("```\ncode\n```\n***\nRight");
        assert_eq!(tree.leaves(), vec!["```\ncode\n```", "Right"]);
    }

    #[test]
    fn test_to_markdown_round_trip() {
        let body = "Header\n___\nLeft\n***\nRight\n___\nFooter";
        let tree = build_chunk_tree(body);
        assert_eq!(tree.to_markdown(), body);
    }

    #[test]
    fn test_serialize_shape() {
        let tree = build_chunk_tree("A\n***\nB");
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["type"], "branch");
        assert_eq!(json["direction"], "horizontal");
        assert_eq!(json["children"][0]["paragraph"], "A");
    }
}
