//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use waymark::{CoordinatorId, Modal, Navigator, PresentationStyle, StateChange, StateSnapshot};

// -- App fixtures -------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AppScreen {
    Home,
    Detail(u32),
    Settings,
    SettingsGeneral,
    Profile,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AppModal {
    Settings,
    Compose,
    Photo(u32),
    Toast,
}

impl Modal for AppModal {
    fn style(&self) -> PresentationStyle {
        match self {
            AppModal::Settings | AppModal::Compose => PresentationStyle::Sheet,
            AppModal::Photo(_) => PresentationStyle::Cover,
            AppModal::Toast => PresentationStyle::Overlay,
        }
    }
}

pub type AppNavigator = Navigator<AppScreen, AppModal>;
pub type AppSnapshot = StateSnapshot<AppScreen, AppModal>;

pub fn make_navigator() -> AppNavigator {
    Navigator::new(AppScreen::Home)
}

pub fn screens(navigator: &AppNavigator, id: CoordinatorId) -> Vec<AppScreen> {
    navigator.navigation(id).expect("coordinator is live").to_vec()
}

/// Application modals on the stack, bottom first. Alerts are skipped.
pub fn modals(navigator: &AppNavigator, id: CoordinatorId) -> Vec<AppModal> {
    navigator
        .modals(id)
        .expect("coordinator is live")
        .iter()
        .filter_map(|e| e.presentation().as_modal().cloned())
        .collect()
}

// -- Listener spies -----------------------------------------------------------

pub type Recorded = Arc<Mutex<Vec<(StateChange, AppSnapshot)>>>;

/// Subscribe a listener that records every notification for `id`.
pub fn record(navigator: &mut AppNavigator, id: CoordinatorId) -> Recorded {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = recorded.clone();
    navigator
        .on_state_changed(id, move |change, snapshot| {
            sink.lock().push((*change, snapshot.clone()));
        })
        .expect("subscribe");
    recorded
}

pub fn changes(recorded: &Recorded) -> Vec<StateChange> {
    recorded.lock().iter().map(|(c, _)| *c).collect()
}

// -- Files --------------------------------------------------------------------

/// Write `content` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write file");
    (temp_dir, path)
}
