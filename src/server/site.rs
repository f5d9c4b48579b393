//! Everything a request handler needs, built once at startup.

use anyhow::Result;

use super::template::{BlogVars, NoVars, PageVars, PostVars, Templates, TerminalVars};
use crate::{
    config::SiteConfig,
    content::{self, ContentError, markdown},
    debug,
    terminal::Interpreter,
    utils::date::current_year,
};

/// Body class of each page kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Blog,
    Post,
    NotFound,
}

impl PageKind {
    fn classes(self) -> &'static str {
        match self {
            Self::Home | Self::NotFound => "home",
            Self::Blog => "blog",
            Self::Post => "post",
        }
    }
}

pub struct Site {
    config: SiteConfig,
    templates: Templates,
    interpreter: Interpreter,
}

impl Site {
    /// Load templates and set up the terminal.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let templates = Templates::load(&config.paths.templates)?;
        debug!("serve"; "templates loaded from {}", config.paths.templates.display());
        Ok(Self::with_templates(config, templates))
    }

    pub fn with_templates(config: SiteConfig, templates: Templates) -> Self {
        let interpreter = Interpreter::new(config.terminal.clone());
        Self {
            config,
            templates,
            interpreter,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn render_home(&self, path: &str) -> String {
        let body = self.templates.index.render(&NoVars);
        self.render_page(PageKind::Home, path, &self.config.site.title, &body)
    }

    pub fn render_not_found(&self, path: &str) -> String {
        let body = self.templates.not_found.render(&NoVars);
        self.render_page(PageKind::NotFound, path, "Not Found", &body)
    }

    /// Post list page. Fails when the content directory is missing.
    pub fn render_blog(&self, path: &str) -> Result<String, ContentError> {
        let posts = content::list_posts(&self.config.paths.content)?;
        let body = self.templates.blog.render(&BlogVars { posts: &posts });
        Ok(self.render_page(PageKind::Blog, path, "Blog", &body))
    }

    /// A single post; `Ok(None)` when there is no such post.
    pub fn render_post(&self, path: &str, slug: &str) -> Result<Option<String>, ContentError> {
        let Some(file) = content::find_post(&self.config.paths.content, slug)? else {
            return Ok(None);
        };

        let html = markdown::render_file(&file)?;
        let title = content::title_from_slug(slug);
        let body = self.templates.post.render(&PostVars {
            title: &title,
            content: &html,
        });
        Ok(Some(self.render_page(PageKind::Post, path, &title, &body)))
    }

    fn render_page(&self, kind: PageKind, path: &str, title: &str, body: &str) -> String {
        let nav = self.templates.nav.render(&NoVars);
        let command_url = self.command_url(path);
        let terminal = self.templates.terminal.render(&TerminalVars {
            command_url: &command_url,
        });

        self.templates.base.render(&PageVars {
            title,
            description: &self.config.site.description,
            classes: kind.classes(),
            year: current_year(),
            nav: &nav,
            terminal: &terminal,
            content: body,
        })
    }

    /// Command endpoint for a page: the mount prefix followed by the page path.
    pub fn command_url(&self, path: &str) -> String {
        format!("{}{}", self.config.terminal.mount, path)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    /// Minimal template set that makes every placeholder visible.
    pub(crate) fn write_templates(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        let files = [
            (
                "base.html",
                "<title>__TITLE__</title><body class=\"__CLASSES__\">__NAV__\n__CONTENT__\n__TERMINAL__\n(c) __YEAR__</body>",
            ),
            ("nav.html", "<nav><a href=\"/blog/\">blog</a></nav>"),
            ("terminal.html", "<form data-post=\"__COMMAND_URL__\"></form>"),
            ("index.html", "<p>welcome</p>"),
            ("blog.html", "<ul>__POSTS__</ul>"),
            ("post.html", "<article><h1>__POST_TITLE__</h1>__POST_CONTENT__</article>"),
            ("404.html", "<p>nothing here</p>"),
        ];
        for (name, body) in files {
            fs::write(dir.join(name), body).unwrap();
        }
    }

    /// A site rooted in a temp dir with the given posts.
    pub(crate) fn test_site(posts: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.paths.content = dir.path().join("content");
        config.paths.templates = dir.path().join("templates");
        config.paths.static_dir = dir.path().join("static");

        write_templates(&config.paths.templates);
        fs::create_dir_all(&config.paths.content).unwrap();
        fs::create_dir_all(&config.paths.static_dir).unwrap();
        for (name, body) in posts {
            fs::write(config.paths.content.join(name), body).unwrap();
        }

        let site = Site::new(config).unwrap();
        (dir, site)
    }

    #[test]
    fn test_render_home() {
        let (_dir, site) = test_site(&[]);
        let html = site.render_home("/");
        assert!(html.contains("<title>sbx blog</title>"));
        assert!(html.contains("class=\"home\""));
        assert!(html.contains("<p>welcome</p>"));
        assert!(html.contains("data-post=\"/commands/\""));
        assert!(html.contains(&format!("(c) {}", current_year())));
    }

    #[test]
    fn test_render_blog_lists_posts() {
        let (_dir, site) = test_site(&[("second-post.md", "b"), ("first.md", "a"), ("notes.txt", "")]);
        let html = site.render_blog("/blog/").unwrap();
        assert!(html.contains("class=\"blog\""));
        assert!(html.contains("<a href=\"/blog/first\">first</a>"));
        assert!(html.contains("<a href=\"/blog/second-post\">second post</a>"));
        assert!(!html.contains("notes"));
        assert!(html.find("first").unwrap() < html.find("second-post").unwrap());
    }

    #[test]
    fn test_render_blog_missing_content_dir() {
        let (dir, site) = test_site(&[]);
        fs::remove_dir_all(dir.path().join("content")).unwrap();
        assert!(matches!(site.render_blog("/blog/"), Err(ContentError::MissingDir(_))));
    }

    #[test]
    fn test_render_post() {
        let (_dir, site) = test_site(&[("hello-world.md", "# Hi\n\nSome *text*.")]);
        let html = site.render_post("/blog/hello-world", "hello-world").unwrap().unwrap();
        assert!(html.contains("<title>hello world</title>"));
        assert!(html.contains("class=\"post\""));
        assert!(html.contains("<h1>hello world</h1>"));
        assert!(html.contains("<em>text</em>"));
        assert!(html.contains("data-post=\"/commands/blog/hello-world\""));

        assert!(site.render_post("/blog/nope", "nope").unwrap().is_none());
        assert!(site.render_post("/blog/..", "..").is_err());
    }

    #[test]
    fn test_render_not_found() {
        let (_dir, site) = test_site(&[]);
        let html = site.render_not_found("/404");
        assert!(html.contains("nothing here"));
        assert!(html.contains("<title>Not Found</title>"));
    }

    #[test]
    fn test_missing_templates_fail_startup() {
        let mut config = SiteConfig::default();
        let dir = TempDir::new().unwrap();
        config.paths.templates = dir.path().join("none");
        assert!(Site::new(config).is_err());
    }
}
