use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::command::{build_commands, JobCommand, JobRequest};
use crate::error::{Error, Result};
use crate::models::{ChoiceValue, HdTemplate, ValueProvider};
use crate::templates::parse_templates;
use crate::values::{local_values, ValueResolver};

pub const DEFAULT_PROGRAM: &str = "chdman";

/// Handle on a chdman executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chdman {
    program: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub launched: usize,
}

impl Chdman {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn commands(&self, request: &JobRequest) -> Vec<JobCommand> {
        build_commands(&self.program, request)
    }

    pub fn list_templates(&self) -> Result<Vec<HdTemplate>> {
        let output = Command::new(&self.program)
            .arg("listtemplates")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;
        if !output.status.success() {
            return Err(Error::InvalidArgument(format!(
                "{} listtemplates exited with {}",
                self.program.display(),
                output.status
            )));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(parse_templates(&text))
    }

    /// Runs every command in order, each to completion. Launch failures
    /// and non-zero exits are logged and do not stop the batch.
    pub fn run_all(&self, commands: &[JobCommand]) -> RunSummary {
        let mut summary = RunSummary::default();
        for command in commands {
            if run_blocking(command) {
                summary.launched += 1;
            }
        }
        summary
    }
}

impl Default for Chdman {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ValueResolver for Chdman {
    fn resolve(&self, provider: ValueProvider) -> Result<Vec<ChoiceValue>> {
        if let Some(values) = local_values(provider) {
            return Ok(values);
        }
        let templates = self.list_templates()?;
        Ok(templates
            .into_iter()
            .map(|template| ChoiceValue {
                value: template.id.to_string(),
                label: template.label(),
            })
            .collect())
    }
}

fn run_blocking(command: &JobCommand) -> bool {
    log::info!("{}", command.display());
    match Command::new(&command.program).args(&command.args).status() {
        Ok(status) => {
            if !status.success() {
                log::warn!("{} exited with {status}", command.program.display());
            }
            true
        }
        Err(err) => {
            log::warn!("failed to launch {}: {err}", command.program.display());
            false
        }
    }
}
