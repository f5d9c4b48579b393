//! Markup stripping for terminal input.
//!
//! Everything typed into the terminal is echoed back inside the page, so all
//! tags are removed and the remaining text is escaped. Text between tags is
//! kept: `<script>ls</script>` becomes `ls`.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::html;

/// Comments, complete tags, and a dangling unterminated tag at the end.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?(?:-->|$)|</?[A-Za-z!?/][^>]*(?:>|$)").unwrap()
});

/// Strip all markup from `raw` and escape what remains.
///
/// Entities in the input are decoded before escaping so `&amp;` stays
/// `&amp;` instead of turning into `&amp;amp;`.
pub fn sanitize(raw: &str) -> String {
    let text = MARKUP.replace_all(raw, "");
    let text = html::unescape(&text);
    html::escape(&text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(sanitize("echo hello world"), "echo hello world");
    }

    #[test]
    fn test_tags_removed_text_kept() {
        assert_eq!(sanitize("<script>ls</script>"), "ls");
        assert_eq!(sanitize("<b>echo</b> <i>hi</i>"), "echo hi");
        assert_eq!(sanitize("<img src=x onerror=alert(1)>cd"), "cd");
    }

    #[test]
    fn test_comments_and_dangling_tags_removed() {
        assert_eq!(sanitize("ls<!-- hidden -->"), "ls");
        assert_eq!(sanitize("echo hi <a href='x'"), "echo hi ");
        assert_eq!(sanitize("echo <!-- never closed"), "echo ");
    }

    #[test]
    fn test_markup_only_becomes_empty() {
        assert_eq!(sanitize("<div></div>"), "");
        assert!(sanitize("  <br/>  ").trim().is_empty());
    }

    #[test]
    fn test_remaining_text_is_escaped() {
        assert_eq!(sanitize("echo a < b & c"), "echo a &lt; b &amp; c");
        assert_eq!(sanitize("echo &lt;script&gt;"), "echo &lt;script&gt;");
        assert_eq!(sanitize("echo &amp;"), "echo &amp;");
    }

    #[test]
    fn test_control_references_not_decoded() {
        assert_eq!(sanitize("echo a&#0;b"), "echo a&amp;#0;b");
        assert!(!sanitize("echo &#x1B;[2J").contains('\u{1b}'));
    }
}
