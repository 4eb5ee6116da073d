//! Declarative job/media/option schema.
//!
//! Resources are JSON documents named `jobs_types`, `media_types` and
//! `jobs_opts/<job_id>`. They ship embedded in the crate and can be
//! overridden by pointing a [`ResourceStore::Directory`] at a folder laid
//! out the same way.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{
    ChoiceSource, IoFileTypes, JobType, MediaType, OptionDescriptor,
    ValueProvider, WidgetKind, CHD_EXTENSION, CREATE_JOB, EXTRACT_JOB,
};

/// Media identifier -> ordered option descriptors, for one job.
pub type JobOptions = BTreeMap<String, Vec<OptionDescriptor>>;

const JOBS_TYPES: &str = "jobs_types";
const MEDIA_TYPES: &str = "media_types";
const JOBS_OPTS_PREFIX: &str = "jobs_opts/";

const EMBEDDED: &[(&str, &str)] = &[
    ("jobs_types", include_str!("../resources/jobs_types.json")),
    ("media_types", include_str!("../resources/media_types.json")),
    (
        "jobs_opts/create",
        include_str!("../resources/jobs_opts/create.json"),
    ),
    (
        "jobs_opts/extract",
        include_str!("../resources/jobs_opts/extract.json"),
    ),
    (
        "jobs_opts/verify",
        include_str!("../resources/jobs_opts/verify.json"),
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceStore {
    Embedded,
    Directory(PathBuf),
}

impl ResourceStore {
    /// Returns `Ok(None)` when the resource does not exist.
    pub fn read(&self, name: &str) -> Result<Option<String>> {
        match self {
            Self::Embedded => Ok(EMBEDDED
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, contents)| contents.to_string())),
            Self::Directory(dir) => {
                let path = dir.join(format!("{name}.json"));
                match fs::read_to_string(&path) {
                    Ok(contents) => Ok(Some(contents)),
                    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
                    Err(err) => Err(Error::Io(err)),
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    store: ResourceStore,
    jobs: Vec<JobType>,
    media: Vec<MediaType>,
}

impl Catalog {
    pub fn load(store: ResourceStore) -> Result<Self> {
        let jobs: Vec<JobType> = serde_json::from_str(&read_required(&store, JOBS_TYPES)?)?;
        let media: Vec<MediaType> = serde_json::from_str(&read_required(&store, MEDIA_TYPES)?)?;
        log::debug!(
            "loaded catalog: {} job types, {} media types",
            jobs.len(),
            media.len()
        );
        Ok(Self { store, jobs, media })
    }

    pub fn embedded() -> Result<Self> {
        Self::load(ResourceStore::Embedded)
    }

    pub fn jobs(&self) -> &[JobType] {
        &self.jobs
    }

    pub fn media(&self) -> &[MediaType] {
        &self.media
    }

    pub fn job(&self, job_id: &str) -> Result<&JobType> {
        self.jobs
            .iter()
            .find(|job| job.job_id == job_id)
            .ok_or_else(|| Error::UnknownJob(job_id.to_string()))
    }

    pub fn media_type(&self, media_id: &str) -> Result<&MediaType> {
        self.media
            .iter()
            .find(|media| media.media_id == media_id)
            .ok_or_else(|| Error::UnknownMedia(media_id.to_string()))
    }

    /// Option schema for every media type of `job_id`, or `None` when the
    /// job has no configurable options.
    pub fn job_options(&self, job_id: &str) -> Result<Option<JobOptions>> {
        if job_id.is_empty() || job_id.contains(['/', '\\', '.']) {
            return Err(Error::InvalidArgument(format!("bad job id: {job_id}")));
        }
        let name = format!("{JOBS_OPTS_PREFIX}{job_id}");
        match self.store.read(&name)? {
            Some(contents) => parse_job_options(&contents).map(Some),
            None => {
                log::debug!("no option schema for job `{job_id}`");
                Ok(None)
            }
        }
    }

    /// Ordered descriptors for one (job, media) pair; empty when either has
    /// no schema entry.
    pub fn options_for(&self, job_id: &str, media_id: &str) -> Result<Vec<OptionDescriptor>> {
        let Some(mut options) = self.job_options(job_id)? else {
            return Ok(Vec::new());
        };
        Ok(options.remove(media_id).unwrap_or_default())
    }

    pub fn io_file_types(&self, job_id: &str, media_id: &str) -> Result<IoFileTypes> {
        let chd = vec![CHD_EXTENSION.to_string()];
        let types = match job_id {
            CREATE_JOB => IoFileTypes {
                inputs: self.media_type(media_id)?.file_types.clone(),
                outputs: chd,
            },
            EXTRACT_JOB => IoFileTypes {
                inputs: chd,
                outputs: self.media_type(media_id)?.file_types.clone(),
            },
            _ => IoFileTypes {
                inputs: chd,
                outputs: Vec::new(),
            },
        };
        Ok(types)
    }

    /// chdman verb for the pair, e.g. `createcd` or `verify`.
    pub fn verb(&self, job_id: &str, media_id: &str) -> Result<String> {
        let job = self.job(job_id)?;
        if job.is_media_specific() {
            self.media_type(media_id)?;
        }
        Ok(crate::command::verb(job_id, media_id))
    }
}

fn read_required(store: &ResourceStore, name: &str) -> Result<String> {
    store
        .read(name)?
        .ok_or_else(|| Error::MissingResource(name.to_string()))
}

#[derive(Debug, Deserialize)]
struct RawOption {
    opt_id: String,
    desc: String,
    #[serde(default)]
    widget: Option<String>,
    #[serde(default)]
    widget_opts: Option<RawWidgetOpts>,
}

#[derive(Debug, Deserialize)]
struct RawWidgetOpts {
    values: RawValues,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValues {
    List(Vec<serde_json::Value>),
    Provider { provider: String },
}

/// Parses one `jobs_opts/<job>` document.
pub fn parse_job_options(json: &str) -> Result<JobOptions> {
    let raw: BTreeMap<String, Vec<RawOption>> = serde_json::from_str(json)?;
    let mut out = JobOptions::new();
    for (media_id, options) in raw {
        let descriptors = options
            .into_iter()
            .map(descriptor_from_raw)
            .collect::<Result<Vec<_>>>()?;
        out.insert(media_id, descriptors);
    }
    Ok(out)
}

fn descriptor_from_raw(raw: RawOption) -> Result<OptionDescriptor> {
    let widget = match raw.widget.as_deref() {
        None | Some("none") => WidgetKind::None,
        Some("text") | Some("line_edit") => WidgetKind::Text,
        Some("choice") | Some("dropdown") => {
            let values = raw.widget_opts.map(|opts| opts.values).ok_or_else(|| {
                Error::InvalidArgument(format!("choice option `{}` has no values", raw.opt_id))
            })?;
            WidgetKind::Choice(choice_source(&raw.opt_id, values)?)
        }
        Some(other) => {
            return Err(Error::UnknownWidgetKind {
                opt_id: raw.opt_id,
                kind: other.to_string(),
            })
        }
    };

    Ok(OptionDescriptor {
        opt_id: raw.opt_id,
        desc: raw.desc,
        widget,
    })
}

fn choice_source(opt_id: &str, values: RawValues) -> Result<ChoiceSource> {
    match values {
        RawValues::List(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s),
                serde_json::Value::Number(n) => Ok(n.to_string()),
                serde_json::Value::Bool(b) => Ok(b.to_string()),
                other => Err(Error::InvalidArgument(format!(
                    "unsupported choice value for `{opt_id}`: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(ChoiceSource::Static),
        RawValues::Provider { provider } => ValueProvider::from_name(&provider)
            .map(ChoiceSource::Provider)
            .ok_or_else(|| Error::UnknownValueProvider {
                opt_id: opt_id.to_string(),
                provider,
            }),
    }
}
