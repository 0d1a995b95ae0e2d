// ABOUTME: Compositor that splits a markdown document into slide pages
// ABOUTME: Handles page boundaries, per-page annotations and heading inheritance

use crate::chunk::{build_chunk_tree, Chunk};
use crate::deco::parse_deco;
use crate::errors::Result;
use crate::frontmatter::parse_frontmatter;
use crate::md_helper::{
    contains_deco, header_level, header_text, is_divider, is_empty, is_fence_marker,
    rm_comments, DividerKind,
};
use crate::option::PageOption;
use log::debug;
use serde::Serialize;

/// One slide: its headings, heading-free body and resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub page_id: usize,
    pub h1: Option<String>,
    pub h2: Option<String>,
    pub h3: Option<String>,
    pub raw_md: String,
    pub option: PageOption,
}

impl Page {
    /// First non-empty heading in h1, h2, h3 order.
    pub fn title(&self) -> Option<&str> {
        self.headings().next()
    }

    /// Next non-empty heading after the title.
    pub fn subtitle(&self) -> Option<&str> {
        self.headings().nth(1)
    }

    fn headings(&self) -> impl Iterator<Item = &str> {
        [&self.h1, &self.h2, &self.h3]
            .into_iter()
            .filter_map(|h| h.as_deref())
            .filter(|h| !h.is_empty())
    }

    /// Layout tree of the body, rebuilt on every call.
    pub fn chunk_tree(&self) -> Chunk {
        build_chunk_tree(&self.raw_md)
    }
}

/// Composites a markdown document into slide pages.
///
/// Runs comment removal, frontmatter extraction, page splitting and heading
/// inheritance. A malformed annotation line aborts the whole document.
pub fn composite(document: &str) -> Result<Vec<Page>> {
    let document = rm_comments(document);
    let (body, base_option) = parse_frontmatter(&document)?;
    let pages = split_pages(&body, &base_option)?;
    let pages = inherit_headings(pages);
    debug!("Composited document into {} pages", pages.len());
    Ok(pages)
}

/// Splits a frontmatter-free body into pages, without heading inheritance.
pub fn split_pages(body: &str, base_option: &PageOption) -> Result<Vec<Page>> {
    let mut splitter = PageSplitter::new(base_option);
    for line in body.split('\n') {
        splitter.feed(line)?;
    }
    splitter.finish()
}

struct BufferedLine<'a> {
    text: &'a str,
    level: usize,
    verbatim: bool,
}

/// Line-scan state for one document.
struct PageSplitter<'a> {
    base_option: &'a PageOption,
    pages: Vec<Page>,
    lines: Vec<BufferedLine<'a>>,
    h1: Option<String>,
    h2: Option<String>,
    h3: Option<String>,
    prev_level: usize,
    escaped: bool,
}

impl<'a> PageSplitter<'a> {
    fn new(base_option: &'a PageOption) -> Self {
        Self {
            base_option,
            pages: Vec::new(),
            lines: Vec::new(),
            h1: None,
            h2: None,
            h3: None,
            prev_level: 0,
            escaped: false,
        }
    }

    fn feed(&mut self, line: &'a str) -> Result<()> {
        if is_fence_marker(line) {
            self.escaped = !self.escaped;
        }
        let level = if self.escaped { 0 } else { header_level(line) };

        if level > 0 && starts_new_page(self.prev_level, level) {
            self.flush()?;
        }

        if !self.escaped && is_divider(line, Some(DividerKind::Section)) {
            return self.flush();
        }

        self.lines.push(BufferedLine {
            text: line,
            level,
            verbatim: self.escaped,
        });

        match level {
            1 => self.h1 = Some(header_text(line)),
            2 => self.h2 = Some(header_text(line)),
            3 => self.h3 = Some(header_text(line)),
            _ => {}
        }

        if level > 0 {
            self.prev_level = level;
        } else if !is_empty(line) && !(contains_deco(line) && !self.escaped) {
            self.prev_level = 0;
        }
        Ok(())
    }

    /// Emits the buffered lines as a page; blank buffers are dropped.
    fn flush(&mut self) -> Result<()> {
        let lines = std::mem::take(&mut self.lines);
        if lines.iter().all(|l| is_empty(l.text)) {
            return Ok(());
        }

        let mut option = self.base_option.clone();
        let mut body = Vec::with_capacity(lines.len());
        for line in &lines {
            if !line.verbatim && contains_deco(line.text) {
                option = parse_deco(line.text, Some(&option))?;
            } else if !(1..=3).contains(&line.level) {
                body.push(line.text);
            }
        }

        self.pages.push(Page {
            page_id: self.pages.len(),
            h1: self.h1.take(),
            h2: self.h2.take(),
            h3: self.h3.take(),
            raw_md: body.join("\n").trim().to_string(),
            option,
        });
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Page>> {
        self.flush()?;
        Ok(self.pages)
    }
}

/// Decides whether a heading of `level` opens a new page, given the level of
/// the heading run it follows (0 when the run was broken by content).
///
/// A deeper heading directly under a shallower one stays on the same page,
/// and so does a level 3+ heading stepping back up from an even deeper one.
pub fn starts_new_page(prev_level: usize, level: usize) -> bool {
    let not_nested = prev_level == 0 || prev_level >= level;
    let deep_step_up = prev_level > level && level >= 3;
    level > 0 && not_nested && !deep_step_up
}

/// Most recent explicit headings seen while walking the page sequence.
#[derive(Default)]
struct HeadingEnv {
    h1: Option<String>,
    h2: Option<String>,
    h3: Option<String>,
}

/// Fills in missing headings from preceding pages.
///
/// A page that sets h1 resets the inherited h2 and h3; one that sets h2
/// resets h3. Per-level `default_hN` flags decide whether a missing heading
/// is taken from the environment.
pub fn inherit_headings(pages: Vec<Page>) -> Vec<Page> {
    let mut env = HeadingEnv::default();
    pages
        .into_iter()
        .map(|mut page| {
            let mut inherit = [
                page.option.default_h1(),
                page.option.default_h2(),
                page.option.default_h3(),
            ];

            if let Some(h1) = &page.h1 {
                env.h1 = Some(h1.clone());
                env.h2 = None;
                env.h3 = None;
                inherit = [false; 3];
            } else if let Some(h2) = &page.h2 {
                env.h2 = Some(h2.clone());
                env.h3 = None;
                inherit[1] = false;
                inherit[2] = false;
            } else if let Some(h3) = &page.h3 {
                env.h3 = Some(h3.clone());
                inherit[2] = false;
            }

            if inherit[0] && page.h1.is_none() {
                page.h1 = env.h1.clone();
            }
            if inherit[1] && page.h2.is_none() {
                page.h2 = env.h2.clone();
            }
            if inherit[2] && page.h3.is_none() {
                page.h3 = env.h3.clone();
            }
            page
        })
        .collect()
}
