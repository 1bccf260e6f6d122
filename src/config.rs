// WHY: command-line and environment settings are parsed once, then validated into
// `Config` so a bad value fails before any buffer is touched

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::action::CleanAction;
use crate::ai::{AiAssistant, CommandCompletion, API_KEY_ENV};
use crate::buffer::Buffer;

/// Default upper bound for one AI request
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

#[derive(Parser, Debug, Clone)]
#[command(name = "launder")]
#[command(about = "Launder dirty text: de-break lines, strip formatting, fix spacing, sentence-case")]
#[command(version)]
pub struct CliArgs {
    /// Input file (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Filter applied to the input buffer; the result lands in the output buffer
    #[arg(short, long, value_enum)]
    pub action: Option<CleanAction>,

    /// Literal text to find (no regex)
    #[arg(long)]
    pub find: Option<String>,

    /// Replacement for every occurrence of --find
    #[arg(long, default_value = "", requires = "find")]
    pub replace: String,

    /// Buffer for find/replace [default: output with --action, input without]
    #[arg(long, value_enum, requires = "find")]
    pub replace_in: Option<Buffer>,

    /// Write the resulting buffer here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print word/char/paragraph counts for both buffers to stderr
    #[arg(long)]
    pub stats: bool,

    /// Write a JSON report with buffer stats and notices
    #[arg(long)]
    pub stats_out: Option<PathBuf>,

    /// Credential for AI actions
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Completion command for AI actions; the prompt arrives on stdin.
    /// Split on whitespace without shell quoting; pass arguments that contain
    /// spaces with --ai-arg
    #[arg(long, env = "LAUNDER_AI_COMMAND")]
    pub ai_command: Option<String>,

    /// Extra argument for --ai-command, passed verbatim (repeatable)
    #[arg(long = "ai-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub ai_args: Vec<String>,

    /// Seconds before an AI request is abandoned
    #[arg(long, env = "LAUNDER_AI_TIMEOUT_SECS", default_value_t = DEFAULT_AI_TIMEOUT_SECS)]
    pub ai_timeout_secs: u64,
}

/// Find/replace request resolved against a concrete buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindReplacePlan {
    pub target: Buffer,
    pub find: String,
    pub replace: String,
}

/// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub action: Option<CleanAction>,
    pub find_replace: Option<FindReplacePlan>,
    pub output: Option<PathBuf>,
    pub stats: bool,
    pub stats_out: Option<PathBuf>,
    pub api_key: Option<String>,
    pub ai_command: Option<(String, Vec<String>)>,
    pub ai_timeout: Duration,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        if args.action.is_none() && args.find.is_none() && !args.stats && args.stats_out.is_none() {
            bail!("Nothing to do: pass --action, --find, --stats or --stats-out");
        }
        if args.ai_timeout_secs == 0 {
            bail!("--ai-timeout-secs must be greater than zero");
        }
        if args.ai_command.is_none() && !args.ai_args.is_empty() {
            bail!("--ai-arg needs --ai-command");
        }

        let ai_command = match args.ai_command.as_deref().map(str::trim) {
            None => None,
            Some("") => bail!("--ai-command must not be empty"),
            Some(command) => {
                let mut parts = command.split_whitespace().map(str::to_string);
                // split_whitespace on a non-empty trimmed string yields at least one part
                let program = parts.next().unwrap_or_default();
                let mut command_args: Vec<String> = parts.collect();
                command_args.extend(args.ai_args);
                Some((program, command_args))
            }
        };

        let default_target = if args.action.is_some() {
            Buffer::Output
        } else {
            Buffer::Input
        };
        let find_replace = args.find.map(|find| FindReplacePlan {
            target: args.replace_in.unwrap_or(default_target),
            find,
            replace: args.replace,
        });

        Ok(Self {
            input: args.input,
            action: args.action,
            find_replace,
            output: args.output,
            stats: args.stats,
            stats_out: args.stats_out,
            api_key: args.api_key,
            ai_command,
            ai_timeout: Duration::from_secs(args.ai_timeout_secs),
        })
    }

    /// Buffer whose content is emitted at the end of the run
    pub fn result_buffer(&self) -> Buffer {
        if self.action.is_some() {
            Buffer::Output
        } else {
            Buffer::Input
        }
    }

    /// Assistant backed by the configured completion command, if any
    pub fn ai_assistant(&self) -> AiAssistant<CommandCompletion> {
        let backend = self.ai_command.as_ref().map(|(program, args)| {
            CommandCompletion::new(program.clone(), args.clone(), self.ai_timeout)
                .with_api_key(self.api_key.clone())
        });
        AiAssistant::new(backend, self.api_key.clone())
    }
}
