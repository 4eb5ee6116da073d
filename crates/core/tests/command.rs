use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chdgui_core::chdman::Chdman;
use chdgui_core::command::{build_commands, output_path, verb, JobRequest};
use pretty_assertions::assert_eq;

fn request(job: &str, media: &str, options: Vec<(&str, &str)>) -> JobRequest {
    JobRequest {
        job_id: job.to_string(),
        media_id: media.to_string(),
        inputs: vec![PathBuf::from("foo.cue")],
        output_dir: PathBuf::from("/out"),
        output_ext: Some("chd".to_string()),
        options: options
            .into_iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn create_command_with_one_toggle() {
    let commands = build_commands(
        Path::new("chdman"),
        &request("create", "cd", vec![("compress", "")]),
    );
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].display(),
        r#"chdman createcd --input "foo.cue" --output "/out/foo.chd" --compress """#
    );
    let args: Vec<OsString> = [
        "createcd",
        "--input",
        "foo.cue",
        "--output",
        "/out/foo.chd",
        "--compress",
        "",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    assert_eq!(commands[0].args, args);
    assert_eq!(commands[0].output, Some(PathBuf::from("/out/foo.chd")));
}

#[test]
fn disabled_options_leave_no_trace() {
    let with = build_commands(
        Path::new("chdman"),
        &request("create", "cd", vec![("force", ""), ("hunksize", "4896")]),
    );
    let without = build_commands(
        Path::new("chdman"),
        &request("create", "cd", vec![("force", "")]),
    );
    assert!(with[0].display().ends_with(r#"--force "" --hunksize "4896""#));
    assert!(!without[0].display().contains("hunksize"));
    assert!(!without[0].display().contains("4896"));
    assert_eq!(without[0].args.len(), with[0].args.len() - 2);
}

#[test]
fn one_command_per_input_in_order() {
    let mut req = request("extract", "cd", Vec::new());
    req.inputs = vec![PathBuf::from("/games/a.chd"), PathBuf::from("/games/b.v1.chd")];
    req.output_ext = Some("cue".to_string());

    let commands = Chdman::new("/usr/bin/chdman").commands(&req);
    let rendered: Vec<String> = commands.iter().map(|c| c.display()).collect();
    assert_eq!(
        rendered,
        vec![
            r#"/usr/bin/chdman extractcd --input "/games/a.chd" --output "/out/a.cue""#.to_string(),
            r#"/usr/bin/chdman extractcd --input "/games/b.v1.chd" --output "/out/b.v1.cue""#
                .to_string(),
        ]
    );
}

#[test]
fn jobs_without_output_skip_the_output_pair() {
    let mut req = request("verify", "cd", vec![("fix", "")]);
    req.inputs = vec![PathBuf::from("game.chd")];
    req.output_ext = None;

    let commands = build_commands(Path::new("chdman"), &req);
    assert_eq!(
        commands[0].display(),
        r#"chdman verify --input "game.chd" --fix """#
    );
    assert_eq!(commands[0].output, None);
}

#[test]
fn values_with_quotes_are_escaped_in_display() {
    let commands = build_commands(
        Path::new("chdman"),
        &request("create", "hd", vec![("ident", r#"my "disk".ident"#)]),
    );
    assert!(commands[0]
        .display()
        .ends_with(r#"--ident "my \"disk\".ident""#));
}

#[test]
fn trailing_backslash_stays_inside_quotes() {
    let commands = build_commands(
        Path::new("chdman"),
        &request("create", "hd", vec![("ident", r#"C:\disks\"#), ("force", "")]),
    );
    assert!(commands[0]
        .display()
        .ends_with(r#"--ident "C:\\disks\\" --force """#));
}

#[test]
fn verb_and_output_path() {
    assert_eq!(verb("create", "hd"), "createhd");
    assert_eq!(verb("info", "hd"), "info");
    assert_eq!(
        output_path(Path::new("/in/Disc 1.gdi"), Path::new("/out"), "chd"),
        PathBuf::from("/out/Disc 1.chd")
    );
}

#[test]
fn empty_input_list_builds_nothing() {
    let mut req = request("create", "cd", Vec::new());
    req.inputs.clear();
    assert!(build_commands(Path::new("chdman"), &req).is_empty());
}
