//! Parsing of the command buffer and derivation of the available actions.
//!
//! The buffer holds everything typed since the last action. `#word` tokens
//! pick projects by substring; every other word narrows the item list by
//! content.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static PROJECT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid project token regex"));

/// Words following a `#`, in buffer order.
pub fn project_tokens(buffer: &str) -> Vec<&str> {
    PROJECT_TOKEN
        .captures_iter(buffer)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Whitespace-separated words that are not `#` tokens.
pub fn content_terms(buffer: &str) -> Vec<&str> {
    buffer
        .split_whitespace()
        .filter(|word| !word.starts_with('#'))
        .collect()
}

/// A project is selected when any token is a substring of its name, so
/// `#Work` also picks "Homework".
pub fn project_matches(name: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| name.contains(token))
}

pub fn content_matches(content: &str, terms: &[&str]) -> bool {
    terms.iter().all(|term| content.contains(term))
}

/// Text of a new task: the content terms joined by single spaces.
pub fn add_content(buffer: &str) -> String {
    content_terms(buffer).join(" ")
}

/// What is left of the buffer after an action: its `#` words plus a
/// trailing space, or nothing when there were none.
pub fn collapse(buffer: &str) -> String {
    let kept: Vec<&str> = buffer
        .split_whitespace()
        .filter(|word| word.starts_with('#'))
        .collect();
    if kept.is_empty() {
        String::new()
    } else {
        format!("{} ", kept.join(" "))
    }
}

/// Buffer that narrows the list to one project.
pub fn goto_buffer(project_name: &str) -> String {
    format!("#{project_name} ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Complete,
    Select,
    GotoProject,
    Add,
    AddTaskBelow,
    AddSubtask,
    Quit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add => "ADD",
            Action::AddSubtask => "SUBTASK",
            Action::AddTaskBelow => "TASK BELOW",
            Action::Select => "SELECT",
            Action::Complete => "COMPLETE",
            Action::GotoProject => "GO TO PROJECT",
            Action::Quit => "QUIT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actions on offer for one frame, in the order Tab cycles through them.
pub fn available_actions(matches: usize, has_selection: bool, buffer_empty: bool) -> Vec<Action> {
    let mut actions = Vec::new();
    if matches == 1 && !has_selection {
        actions.extend([Action::Complete, Action::Select, Action::GotoProject]);
    }
    if matches == 0 {
        actions.push(Action::Add);
        if has_selection {
            actions.extend([Action::AddTaskBelow, Action::AddSubtask]);
        }
    }
    if buffer_empty {
        actions.push(Action::Quit);
    }
    actions
}
