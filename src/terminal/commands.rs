//! Terminal verbs and their handlers.
//!
//! Each verb is a [`Command`] entry in [`COMMANDS`]; the interpreter builds
//! its dispatch table from this list and `help` renders from it, so adding a
//! verb is a single entry here.

use rustc_hash::FxHashMap;

use super::{Action, resolve::resolve};
use crate::config::TerminalConfig;
use crate::utils::html::escape;

/// Everything a handler may look at for one invocation.
pub struct Invocation<'a> {
    /// Sanitized tokens, verb first. Never empty.
    pub args: &'a [&'a str],
    /// Full URL the command was posted to.
    pub current_url: &'a str,
    pub config: &'a TerminalConfig,
}

impl Invocation<'_> {
    fn verb(&self) -> &str {
        self.args[0]
    }

    fn rest(&self) -> &[&str] {
        &self.args[1..]
    }
}

/// What a handler produced, before display formatting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub action: Option<Action>,
    pub message: Option<String>,
    pub url: Option<String>,
}

impl Outcome {
    fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }

    fn action(action: Action) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    fn action_with_url(action: Action, url: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

pub type Handler = fn(&Invocation<'_>) -> Outcome;

/// A terminal verb.
pub struct Command {
    pub name: &'static str,
    pub summary: &'static str,
    /// Hidden verbs work but are left out of `help`.
    pub hidden: bool,
    pub handler: Handler,
}

/// All verbs, in `help` order.
pub const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        summary: "Show this help message",
        hidden: false,
        handler: help,
    },
    Command {
        name: "cd",
        summary: "Navigate to another page",
        hidden: false,
        handler: cd,
    },
    Command {
        name: "ls",
        summary: "List available pages",
        hidden: false,
        handler: ls,
    },
    Command {
        name: "clear",
        summary: "Clear the screen",
        hidden: false,
        handler: clear,
    },
    Command {
        name: "github",
        summary: "Open the GitHub page in a new tab",
        hidden: false,
        handler: github,
    },
    Command {
        name: "echo",
        summary: "Echo back the input",
        hidden: false,
        handler: echo,
    },
    Command {
        name: "contact",
        summary: "Show contact information",
        hidden: false,
        handler: contact,
    },
    Command {
        name: "rotate",
        summary: "Tilt the page",
        hidden: true,
        handler: rotate,
    },
    Command {
        name: "malware",
        summary: "Do not run this",
        hidden: true,
        handler: malware,
    },
];

/// Build the verb → handler lookup table.
pub fn dispatch_table() -> FxHashMap<&'static str, Handler> {
    COMMANDS.iter().map(|c| (c.name, c.handler)).collect()
}

/// Message for a verb missing from the table.
pub fn not_found(verb: &str) -> Outcome {
    Outcome::message(format!("{verb}: command not found"))
}

// ============================================================================
// Handlers
// ============================================================================

fn help(_: &Invocation<'_>) -> Outcome {
    let width = COMMANDS
        .iter()
        .filter(|c| !c.hidden)
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    let mut text = String::from("Commands available:");
    for command in COMMANDS.iter().filter(|c| !c.hidden) {
        text.push_str(&format!(
            "\n    {:<width$} - {}",
            command.name, command.summary
        ));
    }
    Outcome::message(text)
}

fn clear(_: &Invocation<'_>) -> Outcome {
    Outcome::action(Action::Clear)
}

fn ls(inv: &Invocation<'_>) -> Outcome {
    let sections: Vec<_> = inv.config.sections.iter().map(|s| escape(s)).collect();
    Outcome::message(sections.join(" "))
}

fn github(inv: &Invocation<'_>) -> Outcome {
    Outcome::action_with_url(Action::OpenUrl, inv.config.github.as_str())
}

fn echo(inv: &Invocation<'_>) -> Outcome {
    if inv.rest().is_empty() {
        Outcome::message(format!("{}: no message provided", inv.verb()))
    } else {
        Outcome::message(inv.rest().join(" "))
    }
}

fn contact(inv: &Invocation<'_>) -> Outcome {
    let mut text = String::from("Contact info:");
    for line in &inv.config.contact {
        text.push_str("\n    ");
        text.push_str(&escape(line));
    }
    Outcome::message(text)
}

fn cd(inv: &Invocation<'_>) -> Outcome {
    let Some(target) = inv.rest().first() else {
        return Outcome::message(format!("{}: path required", inv.verb()));
    };

    match resolve(inv.current_url, target, &inv.config.mount) {
        Ok(url) => Outcome::action_with_url(Action::Navigate, url),
        Err(e) => Outcome::message(format!("Error: {}", escape(&e.to_string()))),
    }
}

fn rotate(_: &Invocation<'_>) -> Outcome {
    Outcome::action(Action::Rotate)
}

fn malware(_: &Invocation<'_>) -> Outcome {
    Outcome::action(Action::Malware)
}
