use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modal::ResolutionPolicy;
use crate::route::{ActionRole, AlertError, Modal, PresentationStyle};

/// Label of the root coordinator in scripts.
pub const ROOT_LABEL: &str = "root";

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Script has {count} steps, the limit is {max}")]
    TooManySteps { count: usize, max: usize },

    #[error("Label '{label}' is reserved for the root coordinator")]
    ReservedLabel { label: String },

    #[error("Unknown coordinator label '{label}'")]
    UnknownCoordinator { label: String },

    #[error("Coordinator label '{label}' is already in use")]
    DuplicateLabel { label: String },

    #[error("No alert is presented on '{at}'")]
    NoAlert { at: String },

    #[error("No alert on '{at}' has an action labelled '{action}'")]
    UnknownAction { at: String, action: String },

    #[error(transparent)]
    Alert(#[from] AlertError),

    #[error("Step {step} failed: {source}")]
    AtStep {
        step: usize,
        #[source]
        source: Box<ScriptError>,
    },
}

/// Screen identity used by scripts: a name plus an optional item id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptScreen {
    pub name: String,
    #[serde(default)]
    pub id: Option<u64>,
}

impl ScriptScreen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    pub fn with_id(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
        }
    }
}

impl fmt::Display for ScriptScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}#{}", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}

/// Modal identity used by scripts. The style is part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptModal {
    pub name: String,
    pub style: PresentationStyle,
}

impl ScriptModal {
    pub fn new(name: impl Into<String>, style: PresentationStyle) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }
}

impl Modal for ScriptModal {
    fn style(&self) -> PresentationStyle {
        self.style
    }
}

impl fmt::Display for ScriptModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.style, self.name)
    }
}

/// One button of a scripted alert and what tapping it does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub label: String,
    #[serde(default)]
    pub role: ActionRole,
    /// Leave the alert presented after the tap.
    #[serde(default)]
    pub keep: bool,
    /// Pop one screen after the tap.
    #[serde(default)]
    pub pop: bool,
    /// Ask the parent to dismiss this coordinator after the tap.
    #[serde(default)]
    pub finish: bool,
    /// Make the handler return an error.
    #[serde(default)]
    pub fail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Push {
        screen: ScriptScreen,
    },
    Pop,
    PopToRoot,
    Reset {
        screen: ScriptScreen,
    },
    Present {
        modal: String,
        #[serde(default)]
        style: PresentationStyle,
        #[serde(default)]
        policy: Option<ResolutionPolicy>,
    },
    PresentFlow {
        modal: String,
        #[serde(default)]
        style: PresentationStyle,
        screen: ScriptScreen,
        label: String,
        #[serde(default)]
        policy: Option<ResolutionPolicy>,
    },
    Alert {
        title: String,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        actions: Vec<ActionSpec>,
    },
    /// Tap an action of the topmost alert carrying that label.
    Tap {
        action: String,
    },
    /// Cancel the topmost alert.
    Cancel,
    Dismiss,
    DismissAll,
    Spawn {
        label: String,
        screen: ScriptScreen,
    },
    Teardown {
        label: String,
    },
    Finish,
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Push { .. } => "push",
            Op::Pop => "pop",
            Op::PopToRoot => "pop_to_root",
            Op::Reset { .. } => "reset",
            Op::Present { .. } => "present",
            Op::PresentFlow { .. } => "present_flow",
            Op::Alert { .. } => "alert",
            Op::Tap { .. } => "tap",
            Op::Cancel => "cancel",
            Op::Dismiss => "dismiss",
            Op::DismissAll => "dismiss_all",
            Op::Spawn { .. } => "spawn",
            Op::Teardown { .. } => "teardown",
            Op::Finish => "finish",
        }
    }

    /// Label this step gives to a new coordinator.
    pub fn new_label(&self) -> Option<&str> {
        match self {
            Op::PresentFlow { label, .. } | Op::Spawn { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Target coordinator label; the root when absent.
    #[serde(default)]
    pub at: Option<String>,
    #[serde(flatten)]
    pub op: Op,
}

impl Step {
    pub fn target(&self) -> &str {
        self.at.as_deref().unwrap_or(ROOT_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub initial: ScriptScreen,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|e| ScriptError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| ScriptError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Checks:
    /// - At most `max_steps` steps
    /// - No step names a new coordinator `root`
    pub fn validate(&self, max_steps: usize) -> Result<(), ScriptError> {
        if self.steps.len() > max_steps {
            return Err(ScriptError::TooManySteps {
                count: self.steps.len(),
                max: max_steps,
            });
        }

        if let Some(label) = self
            .steps
            .iter()
            .filter_map(|s| s.op.new_label())
            .find(|label| *label == ROOT_LABEL)
        {
            return Err(ScriptError::ReservedLabel {
                label: label.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
initial = { name = "home" }

[[steps]]
op = "push"
screen = { name = "detail", id = 3 }

[[steps]]
op = "present"
modal = "share"
style = "overlay"
policy = "reject_if_active"

[[steps]]
at = "flow"
op = "pop"
"#;

    #[test]
    fn parses_tagged_steps() {
        let script = Script::from_toml(SCRIPT).unwrap();
        assert_eq!(script.initial, ScriptScreen::new("home"));
        assert_eq!(script.steps.len(), 3);
        assert_eq!(
            script.steps[0].op,
            Op::Push {
                screen: ScriptScreen::with_id("detail", 3)
            }
        );
        assert_eq!(
            script.steps[1].op,
            Op::Present {
                modal: "share".to_string(),
                style: PresentationStyle::Overlay,
                policy: Some(ResolutionPolicy::RejectIfActive),
            }
        );
        assert_eq!(script.steps[2].target(), "flow");
        assert_eq!(script.steps[0].target(), ROOT_LABEL);
    }

    #[test]
    fn unknown_op_fails_to_parse() {
        let result = Script::from_toml("initial = { name = \"home\" }\n[[steps]]\nop = \"jump\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_limits_steps() {
        let script = Script::from_toml(SCRIPT).unwrap();
        assert!(script.validate(3).is_ok());
        assert!(matches!(
            script.validate(2),
            Err(ScriptError::TooManySteps { count: 3, max: 2 })
        ));
    }

    #[test]
    fn validate_rejects_root_label() {
        let script = Script {
            initial: ScriptScreen::new("home"),
            steps: vec![Step {
                at: None,
                op: Op::Spawn {
                    label: ROOT_LABEL.to_string(),
                    screen: ScriptScreen::new("x"),
                },
            }],
        };
        assert!(matches!(script.validate(10), Err(ScriptError::ReservedLabel { .. })));
    }

    #[test]
    fn screen_display_includes_id() {
        assert_eq!(ScriptScreen::with_id("detail", 9).to_string(), "detail#9");
        assert_eq!(ScriptModal::new("share", PresentationStyle::Cover).to_string(), "cover:share");
    }
}
