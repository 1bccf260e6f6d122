// WHY: drives the buffer state machine for one CLI run and performs the effects it asks for
// The completion call is the only await point; buffers only change through `Buffers::apply`

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::CleanAction;
use crate::ai::{AiAssistant, TextCompletion};
use crate::buffer::{BufferEvent, Buffers, Effect, Notice};
use crate::config::FindReplacePlan;
use crate::stats::TextStats;

/// Steps of one run, applied in order: action, then find/replace
#[derive(Debug, Clone, Default)]
pub struct SessionPlan {
    pub action: Option<CleanAction>,
    pub find_replace: Option<FindReplacePlan>,
}

/// JSON report written by `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub action: Option<CleanAction>,
    pub input: TextStats,
    pub output: TextStats,
    pub notices: Vec<Notice>,
    pub processing_time_ms: u64,
}

/// Apply one event and carry out any completion request it triggers
pub async fn dispatch<C: TextCompletion>(
    buffers: &mut Buffers,
    event: BufferEvent,
    assistant: &AiAssistant<C>,
) {
    if let Effect::RequestCompletion { action, text } = buffers.apply(event) {
        let follow_up = match assistant.run(action, &text).await {
            Ok(text) => BufferEvent::AiCompleted { action, text },
            Err(error) => BufferEvent::AiFailed { action, error },
        };
        buffers.apply(follow_up);
    }
}

/// Run every step of the plan and return the report
///
/// A failing step records an error notice and the remaining steps still run
/// against unchanged buffers.
pub async fn run_session<C: TextCompletion>(
    buffers: &mut Buffers,
    plan: &SessionPlan,
    assistant: &AiAssistant<C>,
) -> SessionReport {
    let start_time = std::time::Instant::now();

    if let Some(action) = plan.action {
        info!(?action, "Running action");
        dispatch(buffers, BufferEvent::ActionRequested(action), assistant).await;
    }

    if let Some(step) = &plan.find_replace {
        info!(buffer = ?step.target, "Running find/replace");
        let event = BufferEvent::FindReplace {
            target: step.target,
            find: step.find.clone(),
            replace: step.replace.clone(),
        };
        dispatch(buffers, event, assistant).await;
    }

    SessionReport {
        action: plan.action,
        input: buffers.input_stats(),
        output: buffers.output_stats(),
        notices: buffers.notices().to_vec(),
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    }
}

impl SessionReport {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}
