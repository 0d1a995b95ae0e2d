// ABOUTME: HTML generation for composited slide decks
// ABOUTME: Renders each page's headings and layout tree, converting leaf markdown with comrak

use crate::chunk::Chunk;
use crate::compositor::{composite, Page};
use crate::errors::{Result, SlideError};
use crate::frontmatter::read_options;
use crate::md_helper::{extract_title, rm_comments};
use comrak::{markdown_to_html, ComrakOptions};
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::info;
use std::fs;
use std::path::Path;

/// Options for rendering a deck to HTML
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Explicit deck title; otherwise taken from the first h1/h2 of the document
    pub title: Option<String>,
    pub fallback_title: String,
    /// Pass raw HTML in slide markdown through unchanged
    pub unsafe_html: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: None,
            fallback_title: "Untitled".to_string(),
            unsafe_html: true,
        }
    }
}

/// Generate a standalone HTML deck from a markdown document
pub fn render_html(document: &str, config: &HtmlConfig) -> Result<String> {
    let pages = composite(document)?;
    let base_option = read_options(&rm_comments(document))?;
    let (width, height) = base_option.computed_slide_size();

    let title = config
        .title
        .clone()
        .or_else(|| extract_title(document))
        .unwrap_or_else(|| config.fallback_title.clone());
    info!("Rendering {} slides for deck '{}'", pages.len(), title);

    let mut options = ComrakOptions::default();
    options.render.unsafe_ = config.unsafe_html;

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", encode_text(&title)));
    html_doc.push_str(&format!(
        "<style>:root {{ --slide-width: {}px; --slide-height: {}px; }}</style>\n",
        width, height
    ));
    html_doc.push_str("</head>\n<body>\n");
    html_doc.push_str(&format!(
        "<div class=\"slides\" data-theme=\"{}\">\n",
        encode_double_quoted_attribute(base_option.theme())
    ));

    for page in &pages {
        html_doc.push_str(&render_page(page, &options));
    }

    html_doc.push_str("</div>\n</body>\n</html>");
    Ok(html_doc)
}

/// Render one page as a slide container
pub fn render_page(page: &Page, options: &ComrakOptions) -> String {
    let style = page
        .option
        .styles()
        .iter()
        .map(|(key, value)| format!("{}: {};", key, value))
        .collect::<Vec<_>>()
        .join(" ");

    let mut html = format!("<div class=\"slide-container\" id=\"slide-{}\">\n", page.page_id);
    html.push_str(&format!(
        "<div class=\"slide-content\" data-layout=\"{}\" data-theme=\"{}\"",
        encode_double_quoted_attribute(page.option.layout()),
        encode_double_quoted_attribute(page.option.theme())
    ));
    if !style.is_empty() {
        html.push_str(&format!(" style=\"{}\"", encode_double_quoted_attribute(&style)));
    }
    html.push_str(">\n");

    for (tag, heading) in [("h1", &page.h1), ("h2", &page.h2), ("h3", &page.h3)] {
        if let Some(text) = heading {
            html.push_str(&format!("<{0}>{1}</{0}>\n", tag, encode_text(text)));
        }
    }

    if !page.raw_md.is_empty() {
        html.push_str(&render_chunk(&page.chunk_tree(), options));
    }

    html.push_str("</div>\n</div>\n");
    html
}

/// Render a layout tree as nested chunk divs
pub fn render_chunk(chunk: &Chunk, options: &ComrakOptions) -> String {
    match chunk {
        Chunk::Leaf { paragraph } => format!(
            "<div class=\"chunk chunk-paragraph\">\n{}</div>\n",
            markdown_to_html(paragraph, options)
        ),
        Chunk::Branch {
            direction,
            children,
        } => {
            let inner: String = children.iter().map(|c| render_chunk(c, options)).collect();
            format!(
                "<div class=\"chunk chunk-{}\">\n{}</div>\n",
                direction.as_str(),
                inner
            )
        }
    }
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(SlideError::FileReadError)?;
        }
    }

    fs::write(output_path, html_content).map_err(SlideError::FileReadError)?;

    Ok(())
}
