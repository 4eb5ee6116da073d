use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::models::is_media_specific_job;

/// Everything needed to turn a batch of inputs into chdman invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub job_id: String,
    pub media_id: String,
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// `None` for jobs that write no output file (`verify`, `info`).
    pub output_ext: Option<String>,
    /// `(flag, value)` pairs; the flag carries no leading dashes.
    pub options: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCommand {
    pub program: PathBuf,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub args: Vec<OsString>,
}

impl JobCommand {
    /// Shell-style rendering with every path and value double-quoted.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().to_string()];
        let mut quote_next = false;
        for (idx, arg) in self.args.iter().enumerate() {
            let text = arg.to_string_lossy();
            if quote_next {
                parts.push(quote(&text));
                quote_next = false;
            } else {
                parts.push(text.to_string());
                quote_next = idx > 0 && text.starts_with("--");
            }
        }
        parts.join(" ")
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn verb(job_id: &str, media_id: &str) -> String {
    if is_media_specific_job(job_id) {
        format!("{job_id}{media_id}")
    } else {
        job_id.to_string()
    }
}

/// `<output_dir>/<input stem>.<ext>`.
pub fn output_path(input: &Path, output_dir: &Path, ext: &str) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| input.as_os_str().to_os_string());
    name.push(".");
    name.push(ext);
    output_dir.join(name)
}

pub fn build_commands(program: &Path, request: &JobRequest) -> Vec<JobCommand> {
    let verb = verb(&request.job_id, &request.media_id);
    request
        .inputs
        .iter()
        .map(|input| {
            let output = request
                .output_ext
                .as_deref()
                .map(|ext| output_path(input, &request.output_dir, ext));

            let mut args: Vec<OsString> = vec![verb.clone().into(), "--input".into()];
            args.push(input.as_os_str().to_os_string());
            if let Some(output) = &output {
                args.push("--output".into());
                args.push(output.as_os_str().to_os_string());
            }
            for (flag, value) in &request.options {
                args.push(format!("--{flag}").into());
                args.push(value.into());
            }

            JobCommand {
                program: program.to_path_buf(),
                input: input.clone(),
                output,
                args,
            }
        })
        .collect()
}
