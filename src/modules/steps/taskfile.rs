use serde_yaml_ng::{Mapping, Value};
use std::path::PathBuf;

use crate::error::{Result, TemplateError};
use crate::modules::step::{Applied, Step};

const TASKFILE_VERSION: &str = "3";

/// Adds one task to a go-task `Taskfile.yml`
#[derive(Debug, Clone)]
pub struct TaskfileTask {
    path: PathBuf,
    name: String,
    description: String,
    commands: Vec<String>,
}

impl TaskfileTask {
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        description: impl Into<String>,
        commands: &[&str],
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            description: description.into(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn read(&self) -> Result<Mapping> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_yaml_ng::from_str::<Value>(&content)? {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(TemplateError::step(self.describe(), "Taskfile is not a mapping")),
        }
    }

    fn write(&self, taskfile: &Mapping) -> Result<()> {
        std::fs::write(&self.path, serde_yaml_ng::to_string(taskfile)?)?;
        Ok(())
    }

    fn has_task(taskfile: &Mapping, name: &str) -> bool {
        taskfile
            .get("tasks")
            .and_then(Value::as_mapping)
            .is_some_and(|tasks| tasks.contains_key(name))
    }

    fn task_value(&self) -> Value {
        let mut task = Mapping::new();
        task.insert("desc".into(), self.description.clone().into());
        task.insert(
            "cmds".into(),
            Value::Sequence(self.commands.iter().cloned().map(Value::from).collect()),
        );
        Value::Mapping(task)
    }
}

impl Step for TaskfileTask {
    fn describe(&self) -> String {
        format!("add task `{}` to {}", self.name, self.path.display())
    }

    fn is_satisfied(&self) -> bool {
        self.read()
            .map(|taskfile| Self::has_task(&taskfile, &self.name))
            .unwrap_or(false)
    }

    /// A task the user already defined under the same name is left alone
    fn apply(&self) -> Result<Applied> {
        let previous = match std::fs::read_to_string(&self.path) {
            Ok(previous) => Some(previous),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let mut taskfile = self.read()?;
        if Self::has_task(&taskfile, &self.name) {
            return Ok(Applied::Unchanged);
        }

        if !taskfile.contains_key("version") {
            taskfile.insert("version".into(), TASKFILE_VERSION.into());
        }

        let mut tasks = match taskfile.remove("tasks") {
            Some(Value::Mapping(tasks)) => tasks,
            _ => Mapping::new(),
        };
        tasks.insert(self.name.clone().into(), self.task_value());
        taskfile.insert("tasks".into(), Value::Mapping(tasks));

        self.write(&taskfile)?;
        Ok(match previous {
            Some(previous) => Applied::Replaced(previous),
            None => Applied::Created,
        })
    }

    /// Put the file back byte for byte, comments and layout included
    fn rollback(&self, applied: &Applied) -> Result<()> {
        match applied {
            Applied::Unchanged => Ok(()),
            Applied::Created => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            },
            Applied::Replaced(previous) => Ok(std::fs::write(&self.path, previous)?),
        }
    }

    /// Only a task identical to the one this step writes is removed
    fn remove(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut taskfile = self.read()?;
        let owned = taskfile
            .get("tasks")
            .and_then(Value::as_mapping)
            .and_then(|tasks| tasks.get(self.name.as_str()))
            .is_some_and(|task| *task == self.task_value());
        if !owned {
            return Ok(());
        }

        let Some(Value::Mapping(mut tasks)) = taskfile.remove("tasks") else {
            return Ok(());
        };
        tasks.remove(self.name.as_str());
        if !tasks.is_empty() {
            taskfile.insert("tasks".into(), Value::Mapping(tasks));
        }
        self.write(&taskfile)
    }
}
