//! Scenario scripts: TOML step lists replayed against a coordinator tree.
//!
//! ```toml
//! initial = { name = "home" }
//!
//! [[steps]]
//! op = "push"
//! screen = { name = "detail", id = 4 }
//!
//! [[steps]]
//! op = "present_flow"
//! modal = "compose"
//! screen = { name = "draft" }
//! label = "compose"
//!
//! [[steps]]
//! at = "compose"
//! op = "alert"
//! title = "Discard draft?"
//! actions = [{ label = "Discard", role = "destructive", finish = true }, { label = "Keep", role = "cancel" }]
//! ```
//!
//! Every step runs against the coordinator named by `at` (default `root`)
//! and produces one [`TranscriptLine`].

mod runner;
mod types;

pub use runner::{ScriptRunner, StepOutcome, Transcript, TranscriptLine};
pub use types::{ActionSpec, Op, Script, ScriptError, ScriptModal, ScriptScreen, Step, ROOT_LABEL};
