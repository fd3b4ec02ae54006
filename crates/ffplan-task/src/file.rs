//! JSON task files.
//!
//! A task file lists fact names, actions referencing facts by name, the
//! initial state and the goal:
//!
//! ```json
//! {
//!   "facts": ["A", "B", "C"],
//!   "actions": [
//!     {"name": "act1", "pre": ["A"], "add": ["B"]},
//!     {"name": "act2", "pre": ["B"], "add": ["C"], "del": []}
//!   ],
//!   "initial": ["A"],
//!   "goal": ["C"]
//! }
//! ```
//!
//! Missing `pre` / `add` / `del` lists default to empty.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ffplan_core::{ActionId, Domain, FactId};

use crate::builder::TaskBuilder;
use crate::error::TaskError;
use crate::task::StripsTask;

/// One action entry of a task file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    /// Unique action name.
    pub name: String,
    /// Precondition fact names.
    #[serde(default)]
    pub pre: Vec<String>,
    /// Add effect fact names.
    #[serde(default)]
    pub add: Vec<String>,
    /// Delete effect fact names.
    #[serde(default)]
    pub del: Vec<String>,
}

/// Serialized form of a [`StripsTask`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// Fact names; position is the fact id.
    pub facts: Vec<String>,
    /// Grounded actions; position is the action id.
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    /// Facts true in the initial state.
    #[serde(default)]
    pub initial: Vec<String>,
    /// Facts required in a goal state.
    pub goal: Vec<String>,
}

impl TaskFile {
    /// Resolve names and build the task.
    pub fn into_task(self) -> Result<StripsTask, TaskError> {
        let mut b = TaskBuilder::new();
        let mut seen = HashSet::with_capacity(self.facts.len());
        for name in &self.facts {
            if !seen.insert(name.as_str()) {
                return Err(TaskError::DuplicateFact { name: name.clone() });
            }
            b.fact(name.as_str());
        }

        let resolve = |b: &TaskBuilder, names: &[String], context: &str| {
            names
                .iter()
                .map(|name| {
                    b.fact_id(name).ok_or_else(|| TaskError::UnknownFact {
                        name: name.clone(),
                        context: context.to_string(),
                    })
                })
                .collect::<Result<Vec<FactId>, TaskError>>()
        };

        for def in &self.actions {
            let context = format!("action '{}'", def.name);
            let pre = resolve(&b, &def.pre, &context)?;
            let add = resolve(&b, &def.add, &context)?;
            let del = resolve(&b, &def.del, &context)?;
            b.action(def.name.as_str(), pre, add, del);
        }
        let initial = resolve(&b, &self.initial, "initial")?;
        let goal = resolve(&b, &self.goal, "goal")?;
        b.initial(initial).goal(goal);
        b.build()
    }

    /// Capture a task in file form.
    pub fn from_task(task: &StripsTask) -> Self {
        let names = |facts: &[FactId]| {
            facts
                .iter()
                .map(|&f| task.fact_name(f).to_string())
                .collect::<Vec<_>>()
        };
        Self {
            facts: task.fact_names().map(str::to_string).collect(),
            actions: task
                .actions()
                .iter()
                .map(|a| ActionDef {
                    name: a.name().to_string(),
                    pre: names(a.preconditions()),
                    add: names(a.add_effects()),
                    del: names(a.delete_effects()),
                })
                .collect(),
            initial: task
                .describe_state(task.initial_state())
                .into_iter()
                .map(str::to_string)
                .collect(),
            goal: names(task.goal_facts()),
        }
    }
}

impl StripsTask {
    /// Parse a task from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, TaskError> {
        let file: TaskFile = serde_json::from_str(json)?;
        file.into_task()
    }

    /// Parse a task from a JSON byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TaskError> {
        let file: TaskFile = serde_json::from_reader(reader)?;
        file.into_task()
    }

    /// Load a task from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaskError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TaskError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let task = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            facts = task.fact_count(),
            actions = task.action_count(),
            "loaded task"
        );
        Ok(task)
    }

    /// Serialize the task as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, TaskError> {
        Ok(serde_json::to_string_pretty(&TaskFile::from_task(self))?)
    }

    /// Render a plan with action names, one `index name` pair per line.
    pub fn format_plan(&self, plan: &[ActionId]) -> String {
        plan.iter()
            .map(|&a| format!("{} {}\n", a, self.action_name(a)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOY: &str = r#"{
        "facts": ["A", "B", "C"],
        "actions": [
            {"name": "act1", "pre": ["A"], "add": ["B"]},
            {"name": "act2", "pre": ["B"], "add": ["C"], "del": []}
        ],
        "initial": ["A"],
        "goal": ["C"]
    }"#;

    #[test]
    fn parses_toy_task() {
        let task = StripsTask::from_json_str(TOY).unwrap();
        assert_eq!(task.fact_count(), 3);
        assert_eq!(task.action_count(), 2);
        assert_eq!(task.initial_state(), &[0b001]);
        assert_eq!(task.goal_facts(), &[FactId(2)]);
        assert!(task.action(ActionId(0)).delete_effects().is_empty());
    }

    #[test]
    fn unknown_fact_names_context() {
        let json = r#"{"facts": ["A"], "actions": [{"name": "x", "pre": ["Z"]}], "goal": ["A"]}"#;
        assert_eq!(
            StripsTask::from_json_str(json).unwrap_err(),
            TaskError::UnknownFact {
                name: "Z".into(),
                context: "action 'x'".into(),
            }
        );
    }

    #[test]
    fn unknown_goal_fact() {
        let json = r#"{"facts": ["A"], "goal": ["B"]}"#;
        assert!(matches!(
            StripsTask::from_json_str(json),
            Err(TaskError::UnknownFact { context, .. }) if context == "goal"
        ));
    }

    #[test]
    fn duplicate_fact_rejected() {
        let json = r#"{"facts": ["A", "A"], "goal": ["A"]}"#;
        assert_eq!(
            StripsTask::from_json_str(json).unwrap_err(),
            TaskError::DuplicateFact { name: "A".into() }
        );
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            StripsTask::from_json_str("{\"facts\": [1]}"),
            Err(TaskError::Parse { .. })
        ));
        assert!(matches!(
            StripsTask::from_json_str(r#"{"facts": ["A"], "goal": ["A"], "extra": 1}"#),
            Err(TaskError::Parse { .. })
        ));
    }

    #[test]
    fn file_form_survives_reload() {
        let task = StripsTask::from_json_str(TOY).unwrap();
        let json = task.to_json_string().unwrap();
        let again = StripsTask::from_json_str(&json).unwrap();
        assert_eq!(TaskFile::from_task(&task), TaskFile::from_task(&again));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TOY.as_bytes()).unwrap();
        let task = StripsTask::load(file.path()).unwrap();
        assert_eq!(task.action_name(ActionId(1)), "act2");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StripsTask::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TaskError::Io { .. }));
    }

    #[test]
    fn format_plan_lists_index_and_name() {
        let task = StripsTask::from_json_str(TOY).unwrap();
        assert_eq!(
            task.format_plan(&[ActionId(0), ActionId(1)]),
            "0 act1\n1 act2\n"
        );
    }
}
