//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::{Confirm, Input, Select};

use crate::error::{NpError, Result};

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_current_version, display_error, display_release_url,
    display_status, display_success, display_version_change,
};

/// Prompt shown when the working tree is dirty
pub const CONFIRM_DIRTY_PROMPT: &str = "尚有未提交的变更，仍然继续？";
/// Prompt of the version selection list
pub const SELECT_VERSION_PROMPT: &str = "选择发布版本:";
/// Prompt of the custom version entry
pub const CUSTOM_VERSION_PROMPT: &str = "输入自定义版本号:";

/// Interactive prompt facility
pub trait Prompter {
    /// Ask a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Pick one of `items`, returning its index.
    fn select(&self, message: &str, items: &[String]) -> Result<usize>;

    /// Read a free-form line of text.
    fn input(&self, message: &str) -> Result<String>;
}

/// Prompts rendered on the terminal with dialoguer
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| NpError::prompt(e.to_string()))
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| NpError::prompt(e.to_string()))
    }

    fn input(&self, message: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NpError::prompt(e.to_string()))
    }
}

/// A canned answer for [ScriptedPrompter]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    /// Select the item with this label
    Select(String),
    Input(String),
}

/// Replays canned answers in order; used to drive the workflow in tests
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompt messages seen so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| NpError::prompt(format!("no scripted answer for '{}'", message)))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(NpError::prompt(format!("expected a confirmation, got {:?}", other))),
        }
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        match self.next(message)? {
            Answer::Select(label) => items
                .iter()
                .position(|item| *item == label)
                .ok_or_else(|| NpError::prompt(format!("'{}' is not offered", label))),
            other => Err(NpError::prompt(format!("expected a selection, got {:?}", other))),
        }
    }

    fn input(&self, message: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Input(text) => Ok(text),
            other => Err(NpError::prompt(format!("expected text input, got {:?}", other))),
        }
    }
}
