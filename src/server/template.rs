//! Page templates with typed variable injection.
//!
//! Templates are plain HTML files under the templates directory, read once at
//! startup. Variables are `__UPPER_CASE__` placeholders; each page kind has its
//! own vars struct so a template can only be rendered with the values it uses.
//!
//! ```text
//! templates/
//! ├── base.html      # __TITLE__ __DESCRIPTION__ __CLASSES__ __YEAR__ __NAV__ __TERMINAL__ __CONTENT__
//! ├── nav.html
//! ├── terminal.html  # __COMMAND_URL__
//! ├── index.html
//! ├── blog.html      # __POSTS__
//! ├── post.html      # __POST_TITLE__ __POST_CONTENT__
//! └── 404.html
//! ```

use anyhow::{Context, Result};
use std::{fs, marker::PhantomData, path::Path};

use crate::{content::PostSummary, utils::html::escape};

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Names the vars type of a template, independent of borrow lifetimes.
pub trait TemplateKind {
    type Vars<'a>: TemplateVars;
}

/// Template with typed variable injection
#[derive(Debug, Clone)]
pub struct Template<K> {
    content: String,
    _marker: PhantomData<K>,
}

impl<K> Template<K> {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            _marker: PhantomData,
        }
    }

    fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(name);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        Ok(Self::new(content))
    }
}

impl<K: TemplateKind> Template<K> {
    pub fn render(&self, vars: &K::Vars<'_>) -> String {
        vars.apply(&self.content)
    }
}

// ============================================================================
// Variable sets
// ============================================================================

macro_rules! template_kinds {
    ($($kind:ident => $vars:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone)]
            pub enum $kind {}

            impl TemplateKind for $kind {
                type Vars<'a> = $vars<'a>;
            }
        )*
    };
}

template_kinds! {
    Page => PageVars,
    Terminal => TerminalVars,
    Blog => BlogVars,
    Post => PostVars,
}

/// Templates without placeholders.
#[derive(Debug, Clone)]
pub enum Fixed {}

impl TemplateKind for Fixed {
    type Vars<'a> = NoVars;
}

pub struct NoVars;

impl TemplateVars for NoVars {
    fn apply(&self, content: &str) -> String {
        content.to_string()
    }
}

/// Outer page shell.
///
/// `nav`, `terminal` and `content` are trusted HTML; the rest is escaped.
pub struct PageVars<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub classes: &'a str,
    pub year: i64,
    pub nav: &'a str,
    pub terminal: &'a str,
    pub content: &'a str,
}

impl TemplateVars for PageVars<'_> {
    fn apply(&self, content: &str) -> String {
        fill(
            content,
            &[
                ("__TITLE__", &*escape(self.title)),
                ("__DESCRIPTION__", &*escape(self.description)),
                ("__CLASSES__", &*escape(self.classes)),
                ("__YEAR__", &*self.year.to_string()),
                ("__NAV__", self.nav),
                ("__TERMINAL__", self.terminal),
                ("__CONTENT__", self.content),
            ],
        )
    }
}

pub struct TerminalVars<'a> {
    /// Where the terminal posts commands: mount prefix + page path.
    pub command_url: &'a str,
}

impl TemplateVars for TerminalVars<'_> {
    fn apply(&self, content: &str) -> String {
        content.replace("__COMMAND_URL__", &escape(self.command_url))
    }
}

pub struct BlogVars<'a> {
    pub posts: &'a [PostSummary],
}

impl TemplateVars for BlogVars<'_> {
    fn apply(&self, content: &str) -> String {
        content.replace("__POSTS__", &post_list(self.posts))
    }
}

pub struct PostVars<'a> {
    pub title: &'a str,
    /// Rendered markdown.
    pub content: &'a str,
}

impl TemplateVars for PostVars<'_> {
    fn apply(&self, content: &str) -> String {
        fill(
            content,
            &[
                ("__POST_TITLE__", &*escape(self.title)),
                ("__POST_CONTENT__", self.content),
            ],
        )
    }
}

/// Substitute placeholders in one pass over `content`.
///
/// Inserted values are never scanned again, so text that looks like a
/// placeholder inside a value stays literal.
fn fill(content: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find("__") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match vars.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

fn post_list(posts: &[PostSummary]) -> String {
    if posts.is_empty() {
        return "<li class=\"empty\">No posts yet.</li>".to_string();
    }

    posts
        .iter()
        .map(|post| {
            format!(
                "<li><a href=\"/blog/{}\">{}</a></li>",
                escape(&post.slug),
                escape(&post.title)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Template set
// ============================================================================

/// Every template the site renders.
#[derive(Debug, Clone)]
pub struct Templates {
    pub base: Template<Page>,
    pub nav: Template<Fixed>,
    pub terminal: Template<Terminal>,
    pub index: Template<Fixed>,
    pub blog: Template<Blog>,
    pub post: Template<Post>,
    pub not_found: Template<Fixed>,
}

impl Templates {
    /// Read all templates from `dir`. Any missing file is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            base: Template::load(dir, "base.html")?,
            nav: Template::load(dir, "nav.html")?,
            terminal: Template::load(dir, "terminal.html")?,
            index: Template::load(dir, "index.html")?,
            blog: Template::load(dir, "blog.html")?,
            post: Template::load(dir, "post.html")?,
            not_found: Template::load(dir, "404.html")?,
        })
    }
}
