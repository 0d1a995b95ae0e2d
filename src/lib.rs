// ABOUTME: Library module for the md-slides program.
// ABOUTME: Composites markdown documents into slide pages with nested layout trees.

pub mod chunk;
pub mod compositor;
pub mod config;
pub mod deco;
pub mod errors;
pub mod frontmatter;
pub mod html;
pub mod md_helper;
pub mod option;
pub mod structure;
pub mod utils;

// Reexport common types and functions
pub use chunk::{build_chunk_tree, Chunk, Direction};
pub use compositor::{composite, inherit_headings, split_pages, Page};
pub use config::Config;
pub use deco::{parse_deco, parse_value};
pub use errors::{Result, SlideError};
pub use frontmatter::{parse_frontmatter, read_options};
pub use html::{render_html, write_html_to_file, HtmlConfig};
pub use option::{AspectRatio, PageOption, StyleValue};
pub use structure::{retrieve_structure, SlideStructure};
