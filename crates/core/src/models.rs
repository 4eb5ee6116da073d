use serde::{Deserialize, Serialize};

pub const CREATE_JOB: &str = "create";
pub const EXTRACT_JOB: &str = "extract";
pub const CHD_EXTENSION: &str = "chd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobType {
    pub job_id: String,
    pub text: String,
}

impl JobType {
    /// Jobs whose chdman verb carries the media suffix (`createcd`, `extracthd`, ...).
    pub fn is_media_specific(&self) -> bool {
        is_media_specific_job(&self.job_id)
    }
}

pub fn is_media_specific_job(job_id: &str) -> bool {
    job_id == CREATE_JOB || job_id == EXTRACT_JOB
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    pub media_id: String,
    pub text: String,
    pub file_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueProvider {
    HunkSizes,
    ProcessorCounts,
    HdTemplates,
}

impl ValueProvider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hunk_sizes" => Some(Self::HunkSizes),
            "processor_counts" => Some(Self::ProcessorCounts),
            "hd_templates" => Some(Self::HdTemplates),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HunkSizes => "hunk_sizes",
            Self::ProcessorCounts => "processor_counts",
            Self::HdTemplates => "hd_templates",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceSource {
    Static(Vec<String>),
    Provider(ValueProvider),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// Toggle only; the flag is passed with an empty value.
    None,
    Text,
    Choice(ChoiceSource),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub opt_id: String,
    pub desc: String,
    pub widget: WidgetKind,
}

/// One entry of a choice list: `value` goes on the command line, `label` is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceValue {
    pub value: String,
    pub label: String,
}

impl ChoiceValue {
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdTemplate {
    pub id: u32,
    pub manufacturer: String,
    pub model: String,
    pub cylinders: u32,
    pub heads: u32,
    pub sectors: u32,
    pub size: String,
}

impl HdTemplate {
    pub fn label(&self) -> String {
        format!(
            "{} - {} {} ({})",
            self.id, self.manufacturer, self.model, self.size
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoFileTypes {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl IoFileTypes {
    pub fn produces_output(&self) -> bool {
        !self.outputs.is_empty()
    }
}
