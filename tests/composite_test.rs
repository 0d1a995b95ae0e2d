use md_slides::{
    build_chunk_tree, composite, parse_deco, parse_frontmatter, retrieve_structure, Chunk,
    Direction, PageOption, StyleValue,
};
use pretty_assertions::assert_eq;

const DECK: &str = r#"---
theme: beam
aspect_ratio: "4:3"
background-color: red
---

<!-- speaker notes are stripped -->
# Moffee Deck
%% so are line comments

Welcome

## Layouts
@(layout=split)

Header area
___
Left column
***
Right column

---

### Details

```
# code stays code
---
```
"#;

#[test]
fn test_full_deck() {
    let pages = composite(DECK).expect("deck should composite");
    assert_eq!(pages.len(), 3);

    let intro = &pages[0];
    assert_eq!(intro.title(), Some("Moffee Deck"));
    assert_eq!(intro.raw_md, "Welcome");
    assert_eq!(intro.option.theme(), "beam");
    assert_eq!(intro.option.computed_slide_size(), (720, 540));
    assert_eq!(
        intro.option.styles().get("background-color"),
        Some(&StyleValue::from("red"))
    );

    let layouts = &pages[1];
    assert_eq!(layouts.title(), Some("Moffee Deck"));
    assert_eq!(layouts.subtitle(), Some("Layouts"));
    assert_eq!(layouts.option.layout(), "split");
    let tree = layouts.chunk_tree();
    assert_eq!(tree.direction(), Some(Direction::Vertical));
    assert_eq!(tree.children()[0].paragraph(), Some("Header area"));
    assert_eq!(tree.children()[1].direction(), Some(Direction::Horizontal));
    assert_eq!(tree.leaves(), vec!["Header area", "Left column", "Right column"]);

    let details = &pages[2];
    assert_eq!(details.h1.as_deref(), Some("Moffee Deck"));
    assert_eq!(details.h2.as_deref(), Some("Layouts"));
    assert_eq!(details.h3.as_deref(), Some("Details"));
    assert_eq!(details.option.layout(), "content");
    assert_eq!(details.raw_md, "```\n# code stays code\n---\n```");
}

#[test]
fn test_outline_of_full_deck() {
    let pages = composite(DECK).unwrap();
    let structure = retrieve_structure(&pages);
    let outline: Vec<(u8, &str, Vec<usize>)> = structure
        .headings
        .iter()
        .map(|h| (h.level, h.content.as_str(), h.page_ids.clone()))
        .collect();
    assert_eq!(
        outline,
        vec![
            (1, "Moffee Deck", vec![0, 1, 2]),
            (2, "Layouts", vec![1, 2]),
            (3, "Details", vec![2]),
        ]
    );
}

#[test]
fn test_basic_deco_without_base() {
    let option = parse_deco("@(layout=split, background=blue)", None).unwrap();
    assert_eq!(option.layout(), "split");
    assert_eq!(option.styles().len(), 1);
    assert_eq!(
        option.styles().get("background"),
        Some(&StyleValue::from("blue"))
    );
}

#[test]
fn test_frontmatter_entry_point() {
    let (body, option) = parse_frontmatter("---\nlayout: centered\n---\n# Hi").unwrap();
    assert_eq!(body, "# Hi");
    assert_eq!(option.layout(), "centered");
    assert_eq!(
        option,
        PageOption::default()
            .with_override("layout", "centered".into())
            .unwrap()
    );
}

#[test]
fn test_horizontal_root() {
    let tree = build_chunk_tree("A\n***\nB\n***\nC");
    assert_eq!(
        tree,
        Chunk::Branch {
            direction: Direction::Horizontal,
            children: vec![Chunk::leaf("A"), Chunk::leaf("B"), Chunk::leaf("C")],
        }
    );
}
