//! Markdown to HTML rendering using pulldown-cmark.
//!
//! GitHub-flavoured extensions are on, headings get stable `id`s for
//! anchor links, and raw HTML in posts is replaced by a comment unless
//! explicitly allowed.

use deunicode::deunicode;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use rustc_hash::FxHashMap;
use std::path::Path;

use super::ContentError;

/// Placeholder emitted instead of raw HTML blocks and inline tags.
const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

/// Options for markdown rendering
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
    /// Derive an `id` for headings that have none
    pub heading_ids: bool,
    /// Pass raw HTML through instead of omitting it
    pub raw_html: bool,
}

impl MarkdownOptions {
    /// Every extension on, raw HTML omitted.
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            heading_ids: true,
            raw_html: false,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Render markdown with [`MarkdownOptions::all`].
pub fn render(markdown: &str) -> String {
    render_with(markdown, &MarkdownOptions::all())
}

/// Render markdown with explicit options.
pub fn render_with(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.to_pulldown_options());

    let events = parser.map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) if !options.raw_html => {
            Event::InlineHtml(CowStr::Borrowed(RAW_HTML_OMITTED))
        }
        other => other,
    });

    let events: Vec<Event<'_>> = if options.heading_ids {
        with_heading_ids(events)
    } else {
        events.collect()
    };

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Read and render a post file.
pub fn render_file(path: &Path) -> Result<String, ContentError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;
    Ok(render(&source))
}

// ============================================================================
// Heading IDs
// ============================================================================

/// Fill in `id` for every heading without one, keeping ids unique.
///
/// Explicit `{#id}`s are reserved up front, so a later explicit id never
/// collides with an earlier generated one.
fn with_heading_ids<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out: Vec<Event<'a>> = events.collect();
    let mut used: FxHashMap<String, usize> = FxHashMap::default();

    for event in &out {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            used.entry(id.to_string()).or_insert(0);
        }
    }

    // (index of the heading start, heading text so far)
    let mut open: Option<(usize, String)> = None;
    let mut generated = Vec::new();

    for (index, event) in out.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { id: None, .. }) => {
                open = Some((index, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, text)) = open.take() {
                    generated.push((start, unique_id(slugify(&text), &mut used)));
                }
            }
            _ => {}
        }
    }

    for (start, id) in generated {
        if let Some(Event::Start(Tag::Heading { id: slot, .. })) = out.get_mut(start) {
            *slot = Some(CowStr::from(id));
        }
    }

    out
}

/// Lowercase ASCII slug of heading text: `"Hello, Wörld!"` → `"hello-world"`.
fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_ascii_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug.to_string()
    }
}

/// Suffix `-1`, `-2`, ... until `base` is unused.
fn unique_id(base: String, used: &mut FxHashMap<String, usize>) -> String {
    let Some(&last) = used.get(&base) else {
        used.insert(base.clone(), 0);
        return base;
    };

    let mut n = last;
    let candidate = loop {
        n += 1;
        let candidate = format!("{base}-{n}");
        if !used.contains_key(&candidate) {
            break candidate;
        }
    };

    used.insert(base, n);
    used.insert(candidate.clone(), 0);
    candidate
}
