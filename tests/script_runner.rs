mod common;

use common::temp_file;
use waymark::script::{Script, ScriptError, ScriptRunner, ScriptScreen, StepOutcome, Transcript};
use waymark::ResolutionPolicy;

fn run(source: &str) -> Transcript {
    let script = Script::from_toml(source).expect("script parses");
    ScriptRunner::run(&script, ResolutionPolicy::OverAll).expect("script runs")
}

fn outcomes(transcript: &Transcript) -> Vec<StepOutcome> {
    transcript.lines.iter().map(|l| l.outcome.clone()).collect()
}

#[test]
fn navigation_steps_report_stack_after_each_step() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "push"
screen = { name = "detail", id = 4 }

[[steps]]
op = "pop"

[[steps]]
op = "pop"
"#);

    assert_eq!(
        outcomes(&transcript),
        vec![StepOutcome::Ok, StepOutcome::Ok, StepOutcome::Noop]
    );
    assert_eq!(transcript.lines[0].screens, vec!["home", "detail#4"]);
    assert_eq!(transcript.lines[2].screens, vec!["home"]);
    assert_eq!(transcript.failures(), 0);
}

#[test]
fn policies_resolve_conflicts() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "present"
modal = "settings"

[[steps]]
op = "present"
modal = "share"
style = "overlay"
policy = "reject_if_active"

[[steps]]
op = "present"
modal = "photo"
style = "cover"
policy = "replace_current"
"#);

    assert_eq!(
        outcomes(&transcript),
        vec![StepOutcome::Ok, StepOutcome::Rejected, StepOutcome::Ok]
    );
    assert_eq!(transcript.lines[1].modals, vec!["sheet:settings"]);
    assert_eq!(transcript.lines[2].modals, vec!["cover:photo"]);
}

#[test]
fn default_policy_applies_to_unnamed_steps() {
    let script = Script::from_toml(
        r#"
initial = { name = "home" }

[[steps]]
op = "present"
modal = "a"

[[steps]]
op = "present"
modal = "b"
"#,
    )
    .unwrap();

    let transcript = ScriptRunner::run(&script, ResolutionPolicy::RejectIfActive).unwrap();
    assert_eq!(transcript.lines[1].outcome, StepOutcome::Rejected);
}

#[test]
fn flow_alert_finish_dismisses_host() {
    let transcript = run(r#"
initial = { name = "inbox" }

[[steps]]
op = "present_flow"
modal = "compose"
screen = { name = "draft" }
label = "compose"

[[steps]]
at = "compose"
op = "alert"
title = "Discard draft?"
actions = [
    { label = "Discard", role = "destructive", finish = true },
    { label = "Keep", role = "cancel" },
]

[[steps]]
at = "compose"
op = "tap"
action = "Discard"

[[steps]]
op = "dismiss"
"#);

    assert_eq!(
        outcomes(&transcript),
        vec![StepOutcome::Ok, StepOutcome::Ok, StepOutcome::Ok, StepOutcome::Noop]
    );
    assert_eq!(transcript.lines[1].modals, vec!["overlay:alert(Discard draft?)"]);
    assert!(!transcript.lines[2].live);
    assert!(transcript.lines[3].modals.is_empty());
}

#[test]
fn steps_on_torn_down_coordinator_fail_without_aborting() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "spawn"
label = "side"
screen = { name = "panel" }

[[steps]]
op = "teardown"
label = "side"

[[steps]]
at = "side"
op = "push"
screen = { name = "more" }

[[steps]]
op = "push"
screen = { name = "next" }
"#);

    assert!(matches!(transcript.lines[2].outcome, StepOutcome::Failed(_)));
    assert_eq!(transcript.lines[3].outcome, StepOutcome::Ok);
    assert_eq!(transcript.failures(), 1);
}

#[test]
fn failing_handler_is_recorded_and_alert_dismissed() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "alert"
title = "Sync"
actions = [{ label = "Retry", fail = true }]

[[steps]]
op = "tap"
action = "Retry"
"#);

    match &transcript.lines[1].outcome {
        StepOutcome::Failed(reason) => assert!(reason.contains("Retry")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(transcript.lines[1].modals.is_empty());
}

#[test]
fn keep_and_cancel() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "alert"
title = "Update"
actions = [{ label = "Later", keep = true }, { label = "Close", role = "cancel" }]

[[steps]]
op = "tap"
action = "Later"

[[steps]]
op = "cancel"
"#);

    assert_eq!(transcript.lines[1].modals.len(), 1);
    assert!(transcript.lines[2].modals.is_empty());
}

#[test]
fn failing_cancel_handler_is_recorded() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "alert"
title = "Upload"
actions = [{ label = "Send" }, { label = "Abort", role = "cancel", fail = true }]

[[steps]]
op = "cancel"
"#);

    match &transcript.lines[1].outcome {
        StepOutcome::Failed(reason) => assert!(reason.contains("Abort")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(transcript.lines[1].modals.is_empty());
    assert_eq!(transcript.failures(), 1);
}

#[test]
fn tap_without_alert_aborts_the_run() {
    let script = Script::from_toml(
        r#"
initial = { name = "home" }

[[steps]]
op = "tap"
action = "OK"
"#,
    )
    .unwrap();

    let err = ScriptRunner::run(&script, ResolutionPolicy::OverAll).unwrap_err();
    match err {
        ScriptError::AtStep { step, source } => {
            assert_eq!(step, 1);
            assert!(matches!(*source, ScriptError::NoAlert { .. }));
        }
        other => panic!("expected AtStep, got {:?}", other),
    }
}

#[test]
fn unknown_label_aborts_the_run() {
    let script = Script::from_toml(
        r#"
initial = { name = "home" }

[[steps]]
at = "nowhere"
op = "pop"
"#,
    )
    .unwrap();

    assert!(matches!(
        ScriptRunner::run(&script, ResolutionPolicy::OverAll),
        Err(ScriptError::AtStep { .. })
    ));
}

#[test]
fn duplicate_live_label_is_rejected_but_torn_down_label_is_reusable() {
    let mut runner = ScriptRunner::new(ScriptScreen::new("home"), ResolutionPolicy::OverAll);
    let spawn = Script::from_toml(
        r#"
initial = { name = "home" }

[[steps]]
op = "spawn"
label = "side"
screen = { name = "panel" }

[[steps]]
op = "teardown"
label = "side"
"#,
    )
    .unwrap();

    runner.step(1, &spawn.steps[0]).unwrap();
    let first = runner.coordinator_id("side").unwrap();
    assert!(matches!(
        runner.step(2, &spawn.steps[0]),
        Err(ScriptError::DuplicateLabel { .. })
    ));

    runner.step(3, &spawn.steps[1]).unwrap();
    runner.step(4, &spawn.steps[0]).unwrap();
    let second = runner.coordinator_id("side").unwrap();
    assert_ne!(first, second);
    assert!(runner.navigator().is_live(second));
}

#[test]
fn load_reads_script_from_disk() {
    let (_dir, path) = temp_file("flow.toml", "initial = { name = \"home\" }\n");
    let script = Script::load(&path).unwrap();
    assert_eq!(script.initial, ScriptScreen::new("home"));
    assert!(script.steps.is_empty());
}

#[test]
fn transcript_serializes_to_json() {
    let transcript = run(r#"
initial = { name = "home" }

[[steps]]
op = "pop"
"#);

    let json = serde_json::to_value(&transcript).unwrap();
    assert_eq!(json["lines"][0]["outcome"]["status"], "noop");
    assert_eq!(json["lines"][0]["op"], "pop");
    assert_eq!(json["lines"][0]["at"], "root");
}
