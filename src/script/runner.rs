use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::coordinator::{
    ActionContext, ActionOutcome, CoordinatorError, CoordinatorId, Navigator, PresentOutcome,
};
use crate::modal::{PresentationId, ResolutionPolicy};
use crate::route::{Alert, AlertAction, AlertResponse, Presentation};

use super::types::{
    ActionSpec, Op, Script, ScriptError, ScriptModal, ScriptScreen, Step, ROOT_LABEL,
};

/// How one step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum StepOutcome {
    Ok,
    /// The operation was valid but changed nothing.
    Noop,
    Rejected,
    Failed(String),
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Ok => f.write_str("ok"),
            StepOutcome::Noop => f.write_str("noop"),
            StepOutcome::Rejected => f.write_str("rejected"),
            StepOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A step and the target coordinator's stacks right after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptLine {
    pub step: usize,
    pub at: String,
    pub op: String,
    pub outcome: StepOutcome,
    /// False once the target has been torn down.
    pub live: bool,
    pub screens: Vec<String>,
    pub modals: Vec<String>,
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stacks = if self.live {
            format!("[{}] {{{}}}", self.screens.join(" > "), self.modals.join(", "))
        } else {
            "(torn down)".to_string()
        };
        write!(
            f,
            "{:>3} {:<10} {:<13} {:<10} {}",
            self.step,
            self.at,
            self.op,
            self.outcome.to_string(),
            stacks
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    pub lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn failures(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l.outcome, StepOutcome::Failed(_)))
            .count()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Failure inside a step: coordinator errors are recorded in the transcript,
/// script errors abort the run.
enum StepError {
    Coordinator(CoordinatorError),
    Script(ScriptError),
}

impl From<CoordinatorError> for StepError {
    fn from(err: CoordinatorError) -> Self {
        StepError::Coordinator(err)
    }
}

impl From<ScriptError> for StepError {
    fn from(err: ScriptError) -> Self {
        StepError::Script(err)
    }
}

/// Replays scripts against a coordinator tree of [`ScriptScreen`]s and
/// [`ScriptModal`]s.
pub struct ScriptRunner {
    navigator: Navigator<ScriptScreen, ScriptModal>,
    labels: HashMap<String, CoordinatorId>,
    default_policy: ResolutionPolicy,
}

impl ScriptRunner {
    pub fn new(initial: ScriptScreen, default_policy: ResolutionPolicy) -> Self {
        let navigator = Navigator::new(initial);
        let mut labels = HashMap::new();
        labels.insert(ROOT_LABEL.to_string(), navigator.root());
        Self {
            navigator,
            labels,
            default_policy,
        }
    }

    /// Run a whole script from a fresh tree.
    pub fn run(
        script: &Script,
        default_policy: ResolutionPolicy,
    ) -> Result<Transcript, ScriptError> {
        let mut runner = Self::new(script.initial.clone(), default_policy);
        let mut transcript = Transcript::default();
        for (index, step) in script.steps.iter().enumerate() {
            let line = runner
                .step(index + 1, step)
                .map_err(|e| ScriptError::AtStep {
                    step: index + 1,
                    source: Box::new(e),
                })?;
            transcript.lines.push(line);
        }
        info!(steps = transcript.lines.len(), failures = transcript.failures(), "script finished");
        Ok(transcript)
    }

    pub fn navigator(&self) -> &Navigator<ScriptScreen, ScriptModal> {
        &self.navigator
    }

    pub fn coordinator_id(&self, label: &str) -> Option<CoordinatorId> {
        self.labels.get(label).copied()
    }

    pub fn step(&mut self, number: usize, step: &Step) -> Result<TranscriptLine, ScriptError> {
        let target = self.resolve(step.target())?;
        let outcome = match self.apply(target, &step.op) {
            Ok(outcome) => outcome,
            Err(StepError::Coordinator(err)) => StepOutcome::Failed(err.to_string()),
            Err(StepError::Script(err)) => return Err(err),
        };

        let (live, screens, modals) = match self.navigator.snapshot(target) {
            Ok(snapshot) => (
                true,
                snapshot.screens.iter().map(ToString::to_string).collect(),
                snapshot.modals.iter().map(|m| describe(&m.presentation)).collect(),
            ),
            Err(_) => (false, Vec::new(), Vec::new()),
        };
        Ok(TranscriptLine {
            step: number,
            at: step.target().to_string(),
            op: step.op.name().to_string(),
            outcome,
            live,
            screens,
            modals,
        })
    }

    fn apply(&mut self, target: CoordinatorId, op: &Op) -> Result<StepOutcome, StepError> {
        let outcome = match op {
            Op::Push { screen } => {
                self.navigator.coordinator(target)?.push(screen.clone())?;
                StepOutcome::Ok
            }
            Op::Pop => changed(self.navigator.coordinator(target)?.pop()?),
            Op::PopToRoot => changed(self.navigator.coordinator(target)?.pop_to_root()?),
            Op::Reset { screen } => {
                self.navigator.coordinator(target)?.reset(screen.clone())?;
                StepOutcome::Ok
            }
            Op::Present { modal, style, policy } => {
                let policy = policy.unwrap_or(self.default_policy);
                let outcome = self
                    .navigator
                    .coordinator(target)?
                    .present(ScriptModal::new(modal.clone(), *style), policy)?;
                presented(outcome)
            }
            Op::PresentFlow {
                modal,
                style,
                screen,
                label,
                policy,
            } => {
                self.claim_label(label)?;
                let policy = policy.unwrap_or(self.default_policy);
                let outcome = self.navigator.coordinator(target)?.present_flow(
                    ScriptModal::new(modal.clone(), *style),
                    screen.clone(),
                    policy,
                )?;
                if let Some(child) = outcome.hosted() {
                    self.labels.insert(label.clone(), child);
                }
                presented(outcome)
            }
            Op::Alert {
                title,
                message,
                actions,
            } => {
                let alert = build_alert(title, message.as_deref(), actions)?;
                presented(self.navigator.coordinator(target)?.present_alert(alert)?)
            }
            Op::Tap { action } => {
                let (presentation, index) = self.find_action(target, action)?;
                let outcome = self.navigator.invoke_alert_action(target, presentation, index)?;
                handled(action, outcome)
            }
            Op::Cancel => {
                let presentation = self.top_alert(target)?;
                let outcome = self.navigator.cancel_alert(target, presentation)?;
                handled("cancel", outcome)
            }
            Op::Dismiss => changed(self.navigator.coordinator(target)?.dismiss()?),
            Op::DismissAll => changed(self.navigator.coordinator(target)?.dismiss_all()? > 0),
            Op::Spawn { label, screen } => {
                self.claim_label(label)?;
                let child = self.navigator.coordinator(target)?.spawn_child(screen.clone())?;
                self.labels.insert(label.clone(), child);
                StepOutcome::Ok
            }
            Op::Teardown { label } => {
                let child = self.resolve(label)?;
                self.navigator.coordinator(target)?.teardown_child(child)?;
                StepOutcome::Ok
            }
            Op::Finish => {
                self.navigator.coordinator(target)?.finish()?;
                StepOutcome::Ok
            }
        };
        Ok(outcome)
    }

    fn resolve(&self, label: &str) -> Result<CoordinatorId, ScriptError> {
        self.coordinator_id(label)
            .ok_or_else(|| ScriptError::UnknownCoordinator {
                label: label.to_string(),
            })
    }

    /// Labels of torn-down coordinators may be reused.
    fn claim_label(&self, label: &str) -> Result<(), ScriptError> {
        match self.labels.get(label) {
            Some(id) if self.navigator.lifecycle(*id).is_some() => Err(ScriptError::DuplicateLabel {
                label: label.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn alerts_top_down(
        &self,
        target: CoordinatorId,
    ) -> Result<Vec<(PresentationId, Alert)>, CoordinatorError> {
        Ok(self
            .navigator
            .modals(target)?
            .iter()
            .rev()
            .filter_map(|e| e.presentation().as_alert().map(|a| (e.id(), a.clone())))
            .collect())
    }

    fn top_alert(&self, target: CoordinatorId) -> Result<PresentationId, StepError> {
        let alerts = self.alerts_top_down(target)?;
        alerts
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StepError::Script(ScriptError::NoAlert { at: self.label_of(target) }))
    }

    fn find_action(
        &self,
        target: CoordinatorId,
        label: &str,
    ) -> Result<(PresentationId, usize), StepError> {
        let alerts = self.alerts_top_down(target)?;
        if alerts.is_empty() {
            return Err(ScriptError::NoAlert { at: self.label_of(target) }.into());
        }
        alerts
            .iter()
            .find_map(|(id, alert)| alert.position(label).map(|index| (*id, index)))
            .ok_or_else(|| {
                ScriptError::UnknownAction {
                    at: self.label_of(target),
                    action: label.to_string(),
                }
                .into()
            })
    }

    fn label_of(&self, id: CoordinatorId) -> String {
        self.labels
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

fn changed(changed: bool) -> StepOutcome {
    if changed {
        StepOutcome::Ok
    } else {
        StepOutcome::Noop
    }
}

fn presented(outcome: PresentOutcome) -> StepOutcome {
    if outcome.is_rejected() {
        StepOutcome::Rejected
    } else {
        StepOutcome::Ok
    }
}

fn handled(action: &str, outcome: ActionOutcome) -> StepOutcome {
    match outcome.error {
        Some(err) => StepOutcome::Failed(format!("action '{}': {:#}", action, err)),
        None => StepOutcome::Ok,
    }
}

fn describe(presentation: &Presentation<ScriptModal>) -> String {
    match presentation {
        Presentation::Modal(modal) => modal.to_string(),
        Presentation::Alert(alert) => format!("overlay:alert({})", alert.title()),
    }
}

fn build_alert(
    title: &str,
    message: Option<&str>,
    actions: &[ActionSpec],
) -> Result<Alert, ScriptError> {
    let mut builder = Alert::builder(title);
    if let Some(message) = message {
        builder = builder.message(message);
    }
    for button in actions {
        let tap = button.clone();
        let handler = move |context: &mut ActionContext| {
            info!(
                coordinator = %context.coordinator(),
                action = context.action_label(),
                "alert action tapped"
            );
            if tap.fail {
                anyhow::bail!("handler for '{}' failed", tap.label);
            }
            if tap.pop {
                context.pop();
            }
            if tap.finish {
                context.finish();
            }
            Ok(if tap.keep {
                AlertResponse::KeepPresented
            } else {
                AlertResponse::Dismiss
            })
        };
        builder = builder.action(AlertAction::new(button.label.clone(), button.role, handler));
    }
    Ok(builder.build()?)
}
