pub mod action;
pub mod ai;
pub mod buffer;
pub mod config;
pub mod normalizer;
pub mod session;
pub mod stats;

// Re-export the pure core for convenient access
pub use normalizer::{
    fix_spacing, launder_all, smart_debreak, strip_formatting, to_sentence_case
};
pub use stats::{get_stats, TextStats};

// Re-export the collaborator layer used by the CLI
pub use action::CleanAction;
pub use ai::{AiAssistant, AiError, CommandCompletion, TextCompletion};
pub use buffer::{find_replace, Buffer, BufferEvent, Buffers, Effect, Notice, NoticeKind, ReplaceError};
pub use session::{run_session, SessionPlan, SessionReport};
