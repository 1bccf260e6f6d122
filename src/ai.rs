// WHY: the buffer controller never talks to a provider directly; `AiAssistant` checks
// the credential, builds the prompt and delegates to a `TextCompletion` backend
// `CommandCompletion` pipes the prompt through a user-configured program and its arguments

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::action::CleanAction;

/// Environment variable holding the credential, also forwarded to the completion command
pub const API_KEY_ENV: &str = "API_KEY";

const POLISH_PROMPT: &str = "You are an expert copy editor. Your task is to fix grammar, punctuation, and flow in the following text without changing its meaning or style excessively. Return ONLY the corrected text. Do not add markdown code blocks.\n\nText to polish:\n";

const SUMMARIZE_PROMPT: &str = "Summarize the following text concisely into a single paragraph. Return ONLY the summary.\n\nText to summarize:\n";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key missing; set API_KEY to use AI actions")]
    MissingCredential,
    #[error("no completion command configured")]
    Unavailable,
    #[error("{0:?} is not an AI action")]
    Unsupported(CleanAction),
    #[error("failed to start completion command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
    #[error("completion backend error: {0}")]
    Backend(String),
}

/// Asynchronous prompt-in, text-out completion backend
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Polish and summarize on top of a completion backend
pub struct AiAssistant<C> {
    backend: Option<C>,
    api_key: Option<String>,
}

impl<C: TextCompletion> AiAssistant<C> {
    pub fn new(backend: Option<C>, api_key: Option<String>) -> Self {
        // WHY: an empty key from the environment is as good as none
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self { backend, api_key }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fix grammar, punctuation and flow without changing meaning
    pub async fn polish(&self, text: &str) -> Result<String, AiError> {
        self.run_prompt(POLISH_PROMPT, text).await
    }

    /// Condense the text into a single paragraph
    pub async fn summarize(&self, text: &str) -> Result<String, AiError> {
        self.run_prompt(SUMMARIZE_PROMPT, text).await
    }

    /// Route an AI action to polish or summarize
    pub async fn run(&self, action: CleanAction, text: &str) -> Result<String, AiError> {
        match action {
            CleanAction::AiPolish => self.polish(text).await,
            CleanAction::AiSummarize => self.summarize(text).await,
            other => Err(AiError::Unsupported(other)),
        }
    }

    async fn run_prompt(&self, instructions: &str, text: &str) -> Result<String, AiError> {
        // Credential is checked before any backend call
        if self.api_key.is_none() {
            return Err(AiError::MissingCredential);
        }
        let backend = self.backend.as_ref().ok_or(AiError::Unavailable)?;

        let prompt = format!("{instructions}{text}");
        debug!(prompt_len = prompt.len(), "Sending completion request");
        let completion = backend.complete(&prompt).await?;

        if completion.trim().is_empty() {
            warn!("Completion was empty, keeping original text");
            return Ok(text.to_string());
        }
        Ok(completion)
    }
}

/// Completion backend that runs an external command
///
/// The prompt is written to the command's stdin and the completion is read
/// from its stdout. The credential is forwarded as `API_KEY`.
#[derive(Debug, Clone)]
pub struct CommandCompletion {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    api_key: Option<String>,
}

impl CommandCompletion {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl TextCompletion for CommandCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        info!(program = %self.program, "Running completion command");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // WHY: a timed-out request must not leave the child running
            .kill_on_drop(true);
        if let Some(key) = &self.api_key {
            command.env(API_KEY_ENV, key);
        }

        let mut child = command.spawn().map_err(|source| AiError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AiError::Backend("command stdin unavailable".to_string()))?;

        // WHY: write and read concurrently so a large prompt cannot deadlock on full pipes
        let write = async move {
            let result = stdin.write_all(prompt.as_bytes()).await;
            drop(stdin);
            result
        };
        let run = async { tokio::join!(write, child.wait_with_output()) };

        let (write_result, output) = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| AiError::Timeout(self.timeout))?;

        if let Err(e) = write_result {
            // Commands that ignore stdin close the pipe early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(AiError::Backend(format!("failed to write prompt: {e}")));
            }
            debug!("Completion command closed stdin early");
        }

        let output = output.map_err(|e| AiError::Backend(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AiError::Backend(format!(
                "command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map(|text| text.trim_end().to_string())
            .map_err(|_| AiError::Backend("completion was not valid UTF-8".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records prompts and answers with a fixed reply
    struct FixedCompletion {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedCompletion {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextCompletion for FixedCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, AiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_missing_credential_skips_backend() {
        let assistant = AiAssistant::new(Some(FixedCompletion::new("ok")), None);
        let err = assistant.polish("text").await.unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
        assert!(assistant.backend.as_ref().unwrap().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_key_counts_as_missing() {
        let assistant = AiAssistant::new(Some(FixedCompletion::new("ok")), Some("  ".to_string()));
        assert!(!assistant.has_credential());
    }

    #[tokio::test]
    async fn test_prompts_embed_text() {
        let assistant = AiAssistant::new(Some(FixedCompletion::new("done")), Some("k".to_string()));
        assert_eq!(assistant.polish("draft one").await.unwrap(), "done");
        assert_eq!(assistant.summarize("draft two").await.unwrap(), "done");

        let prompts = assistant.backend.as_ref().unwrap().prompts.lock().unwrap().clone();
        assert!(prompts[0].starts_with("You are an expert copy editor."));
        assert!(prompts[0].ends_with("draft one"));
        assert!(prompts[1].starts_with("Summarize the following text"));
        assert!(prompts[1].ends_with("draft two"));
    }

    #[tokio::test]
    async fn test_empty_completion_keeps_original() {
        let assistant = AiAssistant::new(Some(FixedCompletion::new("  \n")), Some("k".to_string()));
        assert_eq!(assistant.summarize("original").await.unwrap(), "original");
    }

    #[tokio::test]
    async fn test_run_rejects_local_actions() {
        let assistant = AiAssistant::new(Some(FixedCompletion::new("x")), Some("k".to_string()));
        let err = assistant.run(CleanAction::FixSpacing, "t").await.unwrap_err();
        assert!(matches!(err, AiError::Unsupported(CleanAction::FixSpacing)));
    }

    #[tokio::test]
    async fn test_missing_backend_is_unavailable() {
        let assistant: AiAssistant<FixedCompletion> = AiAssistant::new(None, Some("k".to_string()));
        let err = assistant.polish("t").await.unwrap_err();
        assert!(matches!(err, AiError::Unavailable));
    }
}
