// WHY: explicit state container for the two text buffers
// Every change goes through `Buffers::apply`, which either updates the buffers and
// records a success notice, or records an error notice and leaves both buffers untouched

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::action::CleanAction;
use crate::ai::AiError;
use crate::stats::{get_stats, TextStats};

/// Which buffer an operation targets
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Buffer {
    Input,
    Output,
}

impl Buffer {
    fn label(self) -> &'static str {
        match self {
            Buffer::Input => "Input",
            Buffer::Output => "Output",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Transient user-visible report of a transition
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Discrete events that drive buffer transitions
#[derive(Debug)]
pub enum BufferEvent {
    /// Replace the input buffer with new text
    SetInput(String),
    /// User selected an action on the input buffer
    ActionRequested(CleanAction),
    /// Completion collaborator answered an AI request
    AiCompleted { action: CleanAction, text: String },
    /// Completion collaborator failed an AI request
    AiFailed { action: CleanAction, error: AiError },
    /// Literal global find/replace on one buffer
    FindReplace {
        target: Buffer,
        find: String,
        replace: String,
    },
    /// Move output into input and clear output
    Recycle,
    /// Reset both buffers
    Clear,
}

/// Side effect the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run `action` through the completion collaborator on `text`, then report
    /// the outcome with `AiCompleted` or `AiFailed`
    RequestCompletion { action: CleanAction, text: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("Find term cannot be empty.")]
    EmptySearchTerm,
}

/// Replace every non-overlapping literal occurrence of `find`, scanning left to right
///
/// Returns `Ok(None)` when `find` does not occur in `text`.
pub fn find_replace(text: &str, find: &str, replace: &str) -> Result<Option<String>, ReplaceError> {
    if find.is_empty() {
        return Err(ReplaceError::EmptySearchTerm);
    }
    if !text.contains(find) {
        return Ok(None);
    }
    Ok(Some(text.replace(find, replace)))
}

/// Input and output buffers plus the pending-request flag and notice log
#[derive(Debug, Clone, Default)]
pub struct Buffers {
    input: String,
    output: String,
    ai_pending: bool,
    notices: Vec<Notice>,
}

impl Buffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn ai_pending(&self) -> bool {
        self.ai_pending
    }

    pub fn input_stats(&self) -> TextStats {
        get_stats(&self.input)
    }

    pub fn output_stats(&self) -> TextStats {
        get_stats(&self.output)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Drain the notice log once the caller has shown it
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Apply one event and return the side effect the caller must run
    pub fn apply(&mut self, event: BufferEvent) -> Effect {
        debug!(?event, "Applying buffer event");
        match event {
            BufferEvent::SetInput(text) => {
                self.input = text;
                Effect::None
            }
            BufferEvent::ActionRequested(action) => self.request_action(action),
            BufferEvent::AiCompleted { action, text } => {
                if !self.ai_pending {
                    warn!(?action, "Ignoring completion with no request in flight");
                    return Effect::None;
                }
                self.ai_pending = false;
                self.output = text;
                self.notify(NoticeKind::Success, action.success_message());
                Effect::None
            }
            BufferEvent::AiFailed { action, error } => {
                warn!(?action, %error, "AI request failed");
                self.ai_pending = false;
                let message = match error {
                    AiError::MissingCredential => "API Key Missing. Cannot use AI.",
                    _ => "Operation failed.",
                };
                self.notify(NoticeKind::Error, message);
                Effect::None
            }
            BufferEvent::FindReplace { target, find, replace } => {
                self.find_replace(target, &find, &replace);
                Effect::None
            }
            BufferEvent::Recycle => {
                self.input = std::mem::take(&mut self.output);
                self.notify(NoticeKind::Info, "Output recycled to input.");
                Effect::None
            }
            BufferEvent::Clear => {
                self.input.clear();
                self.output.clear();
                self.notify(NoticeKind::Info, "Buffers cleared.");
                Effect::None
            }
        }
    }

    fn request_action(&mut self, action: CleanAction) -> Effect {
        if action.is_ai() {
            // WHY: one AI request per interaction; the duplicate trigger is rejected, not queued
            if self.ai_pending {
                self.notify(NoticeKind::Error, "AI request already in progress.");
                return Effect::None;
            }
            self.ai_pending = true;
            info!(?action, chars = self.input.len(), "Dispatching AI request");
            return Effect::RequestCompletion {
                action,
                text: self.input.clone(),
            };
        }

        if self.input.is_empty() {
            self.notify(NoticeKind::Error, "Input buffer empty.");
            return Effect::None;
        }

        if let Some(result) = action.apply(&self.input) {
            self.output = result;
            self.notify(NoticeKind::Success, action.success_message());
        }
        Effect::None
    }

    fn find_replace(&mut self, target: Buffer, find: &str, replace: &str) {
        let label = target.label();
        let text = match target {
            Buffer::Input => &mut self.input,
            Buffer::Output => &mut self.output,
        };
        if text.is_empty() {
            let message = format!("{label} buffer is empty.");
            self.notify(NoticeKind::Error, message);
            return;
        }

        match find_replace(text, find, replace) {
            Err(e) => self.notify(NoticeKind::Error, e.to_string()),
            Ok(None) => self.notify(NoticeKind::Info, format!("No matches found in {label}.")),
            Ok(Some(replaced)) => {
                *text = replaced;
                self.notify(NoticeKind::Success, format!("{label} replacements applied."));
            }
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let notice = Notice::new(kind, message);
        debug!(?notice, "Buffer notice");
        self.notices.push(notice);
    }
}
