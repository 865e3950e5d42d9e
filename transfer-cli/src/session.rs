//! Session files and replaying them through a [`Transfer`].
//!
//! A session is a dataset, the caller's initial target keys (and, for
//! controlled sessions, selection), plus a list of user steps. Replaying
//! plays the caller's part too: every `on_change` becomes the new target
//! keys, and in controlled sessions every `on_select_change` becomes the new
//! selection.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use transfer::{CheckStatus, Direction, Pane, Record, Transfer};

use crate::config::Config;
use crate::error::CliError;

fn checked() -> bool {
    true
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Toggle {
        pane: Pane,
        key: String,
        #[serde(default = "checked")]
        checked: bool,
    },
    Range {
        pane: Pane,
        key: String,
        #[serde(default = "checked")]
        checked: bool,
    },
    SelectAll {
        pane: Pane,
        keys: Vec<String>,
        #[serde(default = "checked")]
        check_all: bool,
    },
    SelectVisible {
        pane: Pane,
    },
    Invert {
        pane: Pane,
    },
    Search {
        pane: Pane,
        #[serde(default)]
        query: String,
    },
    Move {
        direction: Direction,
    },
    Remove {
        keys: Vec<String>,
    },
    RemoveAll,
}

impl Step {
    /// Keys this step refers to by name.
    fn keys(&self) -> Vec<&str> {
        match self {
            Step::Toggle { key, .. } | Step::Range { key, .. } => vec![key.as_str()],
            Step::SelectAll { keys, .. } | Step::Remove { keys } => {
                keys.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// A recorded session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub dataset: Vec<Record>,
    #[serde(default)]
    pub target_keys: Vec<String>,
    /// Present for controlled sessions.
    #[serde(default)]
    pub selected_keys: Option<Vec<String>>,
    #[serde(default)]
    pub one_way: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Session {
    /// Read and validate a session file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let session: Session = serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        session.validate()?;
        Ok(session)
    }

    /// Check that every key named by a step exists in the dataset.
    pub fn validate(&self) -> Result<(), CliError> {
        let known: HashSet<&str> = self.dataset.iter().map(|r| r.key.as_str()).collect();
        for (step, entry) in self.steps.iter().enumerate() {
            if let Some(key) = entry.keys().into_iter().find(|k| !known.contains(k)) {
                return Err(CliError::UnknownKey {
                    step,
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A notification fired by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    SelectChange {
        source_selected: Vec<String>,
        target_selected: Vec<String>,
    },
    Change {
        target_keys: Vec<String>,
        direction: Direction,
        moved_keys: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub notifications: Vec<Notification>,
}

/// State after the last step.
#[derive(Debug, Clone, Serialize)]
pub struct FinalState {
    pub target_keys: Vec<String>,
    pub source: Vec<String>,
    pub target: Vec<String>,
    pub source_selected: Vec<String>,
    pub target_selected: Vec<String>,
    pub source_status: CheckStatus,
    pub target_status: CheckStatus,
    pub can_move_right: bool,
    pub can_move_left: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    #[serde(rename = "final")]
    pub final_state: FinalState,
}

/// Build the transfer a session describes, recording its notifications.
pub fn build(
    session: &Session,
    config: &Config,
) -> (Transfer<Record>, Rc<RefCell<Vec<Notification>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let on_select = Rc::clone(&events);
    let on_change = Rc::clone(&events);

    let transfer = match &session.selected_keys {
        Some(selected) => Transfer::<Record>::controlled(selected, &session.target_keys),
        None => Transfer::<Record>::new(),
    };
    let mut transfer = transfer
        .with_one_way(session.one_way)
        .with_disabled(session.disabled)
        .with_filter_mode(config.filter_mode)
        .with_layout(config.layout)
        .on_select_change(move |source, target| {
            on_select.borrow_mut().push(Notification::SelectChange {
                source_selected: source.to_vec(),
                target_selected: target.to_vec(),
            });
        })
        .on_change(move |change| {
            on_change.borrow_mut().push(Notification::Change {
                target_keys: change.target_keys.clone(),
                direction: change.direction,
                moved_keys: change.moved_keys.clone(),
            });
        });

    transfer.sync(
        &session.dataset,
        &session.target_keys,
        session.selected_keys.as_deref(),
    );
    (transfer, events)
}

/// Apply one step against the current target keys.
pub fn apply(
    transfer: &mut Transfer<Record>,
    step: &Step,
    dataset: &[Record],
    target_keys: &[String],
) {
    match step {
        Step::Toggle { pane, key, checked } => {
            transfer.toggle_item(*pane, key.clone(), *checked);
        }
        Step::Range { pane, key, checked } => {
            let split = transfer.partition(dataset, target_keys);
            let rows = transfer.visible_rows(*pane, &split);
            transfer.select_range(*pane, &rows, key.clone(), *checked);
        }
        Step::SelectAll {
            pane,
            keys,
            check_all,
        } => {
            transfer.select_all(*pane, keys, *check_all);
        }
        Step::SelectVisible { pane } => {
            let split = transfer.partition(dataset, target_keys);
            let rows = transfer.visible_rows(*pane, &split);
            transfer.select_visible(*pane, &rows);
        }
        Step::Invert { pane } => {
            let split = transfer.partition(dataset, target_keys);
            let rows = transfer.visible_rows(*pane, &split);
            transfer.invert(*pane, &rows);
        }
        Step::Search { pane, query } => {
            transfer.set_search(*pane, query.clone());
        }
        Step::Move { direction } => {
            transfer.move_to(*direction, dataset, target_keys);
        }
        Step::Remove { keys } => {
            transfer.remove(keys, target_keys);
        }
        Step::RemoveAll => {
            let split = transfer.partition(dataset, target_keys);
            let rows = transfer.visible_rows(Pane::Target, &split);
            transfer.remove_all(&rows, target_keys);
        }
    }
}

/// Play every step of a session, acting as the caller in between.
pub fn replay(session: &Session, config: &Config) -> ReplayReport {
    let (mut transfer, events) = build(session, config);
    let mut target_keys = session.target_keys.clone();
    let mut selected = session.selected_keys.clone();
    let mut steps = Vec::with_capacity(session.steps.len());

    for (index, step) in session.steps.iter().enumerate() {
        apply(&mut transfer, step, &session.dataset, &target_keys);
        let notifications: Vec<Notification> = events.borrow_mut().drain(..).collect();

        for notification in &notifications {
            match notification {
                Notification::Change {
                    target_keys: next, ..
                } => target_keys = next.clone(),
                Notification::SelectChange {
                    source_selected,
                    target_selected,
                } => {
                    if selected.is_some() {
                        selected = Some(
                            source_selected
                                .iter()
                                .chain(target_selected)
                                .cloned()
                                .collect(),
                        );
                    }
                }
            }
        }
        transfer.sync(&session.dataset, &target_keys, selected.as_deref());

        debug!("Step {} {:?}: {} notification(s)", index, step, notifications.len());
        steps.push(StepReport {
            index,
            step: step.clone(),
            notifications,
        });
    }

    let split = transfer.partition(&session.dataset, &target_keys);
    let source_rows = transfer.visible_rows(Pane::Source, &split);
    let target_rows = transfer.visible_rows(Pane::Target, &split);
    let final_state = FinalState {
        source: split.keys(Pane::Source),
        target: split.keys(Pane::Target),
        source_selected: transfer.source_selected().to_vec(),
        target_selected: transfer.target_selected().to_vec(),
        source_status: transfer.check_status(Pane::Source, &source_rows),
        target_status: transfer.check_status(Pane::Target, &target_rows),
        can_move_right: transfer.can_move(Direction::Right, &session.dataset),
        can_move_left: transfer.can_move(Direction::Left, &session.dataset),
        target_keys,
    };
    info!(
        "Replayed {} step(s): {} target key(s)",
        steps.len(),
        final_state.target_keys.len()
    );

    ReplayReport { steps, final_state }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(json: &str) -> Session {
        serde_json::from_str(json).unwrap()
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    const DATASET: &str = r#"[
        { "key": "1", "title": "one" },
        { "key": "2", "title": "two", "disabled": true },
        { "key": "3", "title": "three" }
    ]"#;

    #[test]
    fn test_parse_steps() {
        let s = session(&format!(
            r#"{{ "dataset": {DATASET}, "steps": [
                {{ "op": "toggle", "pane": "source", "key": "1" }},
                {{ "op": "move", "direction": "right" }},
                {{ "op": "remove_all" }}
            ] }}"#
        ));
        assert_eq!(
            s.steps[0],
            Step::Toggle {
                pane: Pane::Source,
                key: "1".to_string(),
                checked: true
            }
        );
        assert_eq!(
            s.steps[1],
            Step::Move {
                direction: Direction::Right
            }
        );
        assert_eq!(s.steps[2], Step::RemoveAll);
    }

    #[test]
    fn test_unknown_step_key_is_rejected() {
        let s = session(&format!(
            r#"{{ "dataset": {DATASET}, "steps": [
                {{ "op": "toggle", "pane": "source", "key": "9" }}
            ] }}"#
        ));
        assert!(matches!(
            s.validate(),
            Err(CliError::UnknownKey { step: 0, .. })
        ));
    }

    #[test]
    fn test_replay_feeds_changes_back() {
        let s = session(&format!(
            r#"{{ "dataset": {DATASET}, "steps": [
                {{ "op": "select_all", "pane": "source", "keys": ["1", "2"] }},
                {{ "op": "move", "direction": "right" }},
                {{ "op": "toggle", "pane": "target", "key": "1" }},
                {{ "op": "move", "direction": "left" }}
            ] }}"#
        ));
        let report = replay(&s, &Config::default());

        assert_eq!(
            report.steps[1].notifications[1],
            Notification::Change {
                target_keys: keys(&["1"]),
                direction: Direction::Right,
                moved_keys: keys(&["1"]),
            }
        );
        assert!(report.final_state.target_keys.is_empty());
        assert_eq!(report.final_state.source, keys(&["1", "2", "3"]));
        assert!(report.final_state.target_selected.is_empty());
    }

    #[test]
    fn test_controlled_replay_tracks_selection() {
        let s = session(&format!(
            r#"{{ "dataset": {DATASET}, "target_keys": ["3"], "selected_keys": ["3"], "steps": [
                {{ "op": "toggle", "pane": "source", "key": "1" }}
            ] }}"#
        ));
        let report = replay(&s, &Config::default());
        assert_eq!(report.final_state.source_selected, keys(&["1"]));
        assert_eq!(report.final_state.target_selected, keys(&["3"]));
        assert_eq!(report.final_state.target_status, CheckStatus::All);
        assert!(report.final_state.can_move_right);
    }
}
