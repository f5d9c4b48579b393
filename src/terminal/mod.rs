//! The homepage terminal: command interpretation.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `commands` | Verb table and per-verb handlers                |
//! | `resolve`  | `cd` target resolution against the current URL  |
//! | `sanitize` | Markup stripping for raw input                  |
//!
//! # Flow
//!
//! ```text
//! raw input → sanitize → tokens → dispatch(verb) → Outcome → CommandResponse
//! ```
//!
//! The interpreter never fails: bad input turns into a message for the user.

mod commands;
mod resolve;
mod sanitize;

use sanitize::sanitize;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::TerminalConfig;
use crate::{debug, log};
use commands::{Handler, Invocation, Outcome};

/// Client-side effect requested by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Wipe the terminal output.
    Clear,
    /// Open `url` in a new tab.
    OpenUrl,
    /// Replace the current location with `url`.
    Navigate,
    Rotate,
    Malware,
}

/// Result of one terminal invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Display payload, already wrapped for insertion into the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Wire form of a [`CommandResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Structured response for the client to interpret.
    Json(String),
    /// Markup to insert as-is. Empty when there is nothing to show.
    Html(String),
}

impl CommandResponse {
    /// True for the response to an empty command line.
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.message.is_none() && self.url.is_none()
    }

    /// Encode for the wire: JSON when an action is set, raw markup otherwise.
    pub fn to_payload(&self) -> serde_json::Result<Payload> {
        if self.is_empty() {
            return Ok(Payload::Html(String::new()));
        }
        if self.action.is_some() {
            serde_json::to_string(self).map(Payload::Json)
        } else {
            Ok(Payload::Html(self.message.clone().unwrap_or_default()))
        }
    }
}

/// Request-side facts about who sent a command.
#[derive(Debug, Clone, Copy)]
pub struct Origin<'a> {
    pub remote_addr: &'a str,
    pub user_agent: &'a str,
}

/// Parses and dispatches terminal commands.
///
/// Immutable after construction; share it across request workers.
pub struct Interpreter {
    config: TerminalConfig,
    table: FxHashMap<&'static str, Handler>,
}

impl Interpreter {
    pub fn new(config: TerminalConfig) -> Self {
        Self {
            config,
            table: commands::dispatch_table(),
        }
    }

    /// Run one raw command line posted from `current_url`.
    pub fn execute(&self, raw: &str, current_url: &str, origin: Origin<'_>) -> CommandResponse {
        let sanitized = sanitize(raw);
        let args: Vec<&str> = sanitized.split_whitespace().collect();

        let Some(&verb) = args.first() else {
            debug!("terminal"; "empty command, user-agent: {}, remote: {}",
                origin.user_agent, origin.remote_addr);
            return CommandResponse::default();
        };

        let invocation = Invocation {
            args: &args,
            current_url,
            config: &self.config,
        };
        let outcome = match self.table.get(verb) {
            Some(handler) => handler(&invocation),
            None => commands::not_found(verb),
        };

        log!("terminal"; "args: {:?}, user-agent: {}, remote: {}",
            args, origin.user_agent, origin.remote_addr);

        let Outcome {
            action,
            message,
            url,
        } = outcome;

        CommandResponse {
            action,
            message: message.map(|m| frame(&args, &m)),
            url,
        }
    }
}

/// Echo the command line above its output, as a shell would.
fn frame(args: &[&str], message: &str) -> String {
    format!("<pre class='ignore'>&gt; {}\n{}</pre>", args.join(" "), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Origin<'static> = Origin {
        remote_addr: "127.0.0.1:5000",
        user_agent: "test-agent",
    };

    fn interpreter() -> Interpreter {
        Interpreter::new(TerminalConfig::default())
    }

    fn exec(raw: &str) -> CommandResponse {
        interpreter().execute(raw, "http://localhost/commands/", ORIGIN)
    }

    #[test]
    fn test_help_has_no_action_and_lists_verbs() {
        let response = exec("help");
        assert!(response.action.is_none());
        let message = response.message.unwrap();
        for verb in ["help", "cd", "ls", "clear", "github", "echo", "contact"] {
            assert!(message.contains(verb), "help is missing {verb}");
        }
    }

    #[test]
    fn test_echo_message_ends_with_text() {
        let message = exec("echo hello world").message.unwrap();
        let body = message.strip_suffix("</pre>").unwrap();
        assert!(body.ends_with("hello world"));
    }

    #[test]
    fn test_message_is_framed_with_command_line() {
        let message = exec("  echo   spaced    out ").message.unwrap();
        assert_eq!(
            message,
            "<pre class='ignore'>&gt; echo spaced out\nspaced out</pre>"
        );
    }

    #[test]
    fn test_cd_parent_from_post() {
        let response = interpreter().execute(
            "cd ..",
            "http://x/commands/blog/post1",
            ORIGIN,
        );
        assert_eq!(response.action, Some(Action::Navigate));
        let url = url::Url::parse(response.url.as_deref().unwrap()).unwrap();
        assert_eq!(url.path(), "/blog");
        assert!(response.message.is_none());
    }

    #[test]
    fn test_unknown_command() {
        let message = exec("unknowncmd").message.unwrap();
        assert!(message.ends_with("\nunknowncmd: command not found</pre>"));
    }

    #[test]
    fn test_markup_is_stripped_before_dispatch() {
        assert_eq!(exec("<script>ls</script>"), exec("ls"));
        assert_eq!(exec("<b>clear</b>"), exec("clear"));
    }

    #[test]
    fn test_empty_command() {
        for raw in ["", "   ", "\t\n", "<p></p>", "<script></script>  "] {
            let response = exec(raw);
            assert!(response.is_empty(), "{raw:?} should be empty");
            assert_eq!(response.to_payload().unwrap(), Payload::Html(String::new()));
        }
    }

    #[test]
    fn test_echo_output_is_escaped() {
        let message = exec("echo a&b \"x\"").message.unwrap();
        assert!(message.contains("a&amp;b &#34;x&#34;"));
        assert!(!message.contains("\"x\""));
    }

    #[test]
    fn test_payload_json_omits_absent_keys() {
        let Payload::Json(json) = exec("clear").to_payload().unwrap() else {
            panic!("clear should be json");
        };
        assert_eq!(json, r#"{"action":"clear"}"#);

        let Payload::Json(json) = exec("github").to_payload().unwrap() else {
            panic!("github should be json");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["action"], "open-url");
        assert!(value["url"].as_str().unwrap().starts_with("https://"));
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_payload_html_for_messages() {
        let Payload::Html(html) = exec("ls").to_payload().unwrap() else {
            panic!("ls should be html");
        };
        assert_eq!(html, "<pre class='ignore'>&gt; ls\nblog home</pre>");
    }

    #[test]
    fn test_configured_sections_and_mount() {
        let config = TerminalConfig {
            mount: "/term".into(),
            sections: vec!["blog".into(), "about".into()],
            ..TerminalConfig::default()
        };
        let interp = Interpreter::new(config);

        let html = interp.execute("ls", "http://x/term/", ORIGIN).message.unwrap();
        assert!(html.ends_with("\nblog about</pre>"));

        let response = interp.execute("cd about", "http://x/term/", ORIGIN);
        assert_eq!(response.url.as_deref(), Some("http://x/about"));
    }
}
