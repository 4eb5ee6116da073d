use std::fs;

use chdgui_core::schema::{parse_job_options, Catalog, ResourceStore};
use chdgui_core::{ChoiceSource, Error, ValueProvider, WidgetKind};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn embedded_catalog_lists_jobs_and_media() {
    let catalog = Catalog::embedded().unwrap();
    let jobs: Vec<&str> = catalog.jobs().iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(jobs, vec!["create", "extract", "verify", "info"]);

    let cd = catalog.media_type("cd").unwrap();
    assert_eq!(cd.file_types, vec!["cue", "gdi", "toc"]);
    assert!(matches!(catalog.media_type("floppy"), Err(Error::UnknownMedia(_))));
    assert!(matches!(catalog.job("explode"), Err(Error::UnknownJob(_))));
}

#[test]
fn job_without_schema_has_no_options() {
    let catalog = Catalog::embedded().unwrap();
    assert!(catalog.job_options("info").unwrap().is_none());
    assert!(catalog.options_for("info", "cd").unwrap().is_empty());
}

#[test]
fn media_without_entry_has_no_options() {
    let dir = TempDir::new().unwrap();
    write_base(&dir);
    fs::write(
        dir.path().join("jobs_opts/create.json"),
        r#"{ "cd": [ { "opt_id": "force", "desc": "Force" } ] }"#,
    )
    .unwrap();

    let catalog = Catalog::load(ResourceStore::Directory(dir.path().to_path_buf())).unwrap();
    assert_eq!(catalog.options_for("create", "cd").unwrap().len(), 1);
    assert!(catalog.options_for("create", "hd").unwrap().is_empty());
}

#[test]
fn static_choice_values_are_kept_verbatim() {
    let catalog = Catalog::embedded().unwrap();
    let options = catalog.options_for("create", "cd").unwrap();
    let compression = options.iter().find(|o| o.opt_id == "compression").unwrap();
    assert_eq!(
        compression.widget,
        WidgetKind::Choice(ChoiceSource::Static(vec![
            "cdlz,cdzl,cdfl".to_string(),
            "cdzs,cdzl,cdfl".to_string(),
            "cdlz".to_string(),
            "cdzl".to_string(),
            "none".to_string(),
        ]))
    );
}

#[test]
fn numeric_choice_values_are_stringified() {
    let parsed = parse_job_options(
        r#"{ "hd": [ { "opt_id": "hunksize", "desc": "Hunk size", "widget": "dropdown",
                       "widget_opts": { "values": [512, 4096] } } ] }"#,
    )
    .unwrap();
    assert_eq!(
        parsed["hd"][0].widget,
        WidgetKind::Choice(ChoiceSource::Static(vec![
            "512".to_string(),
            "4096".to_string()
        ]))
    );
}

#[test]
fn widget_aliases_and_providers_parse() {
    let parsed = parse_job_options(
        r#"{ "cd": [
            { "opt_id": "force", "desc": "Force" },
            { "opt_id": "outputparent", "desc": "Parent", "widget": "line_edit" },
            { "opt_id": "numprocessors", "desc": "CPUs", "widget": "choice",
              "widget_opts": { "values": { "provider": "processor_counts" } } }
        ] }"#,
    )
    .unwrap();
    let widgets: Vec<&WidgetKind> = parsed["cd"].iter().map(|o| &o.widget).collect();
    assert_eq!(
        widgets,
        vec![
            &WidgetKind::None,
            &WidgetKind::Text,
            &WidgetKind::Choice(ChoiceSource::Provider(ValueProvider::ProcessorCounts)),
        ]
    );
}

#[test]
fn unknown_widget_kind_is_fatal() {
    let err = parse_job_options(
        r#"{ "cd": [ { "opt_id": "force", "desc": "Force", "widget": "slider" } ] }"#,
    )
    .unwrap_err();
    match err {
        Error::UnknownWidgetKind { opt_id, kind } => {
            assert_eq!(opt_id, "force");
            assert_eq!(kind, "slider");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_provider_is_fatal() {
    let err = parse_job_options(
        r#"{ "cd": [ { "opt_id": "x", "desc": "X", "widget": "choice",
                       "widget_opts": { "values": { "provider": "nope" } } } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownValueProvider { .. }));
}

#[test]
fn choice_without_values_is_rejected() {
    let err = parse_job_options(r#"{ "cd": [ { "opt_id": "x", "desc": "X", "widget": "choice" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn directory_store_requires_base_resources() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::load(ResourceStore::Directory(dir.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, Error::MissingResource(_)));
}

#[test]
fn io_file_types_follow_job_direction() {
    let catalog = Catalog::embedded().unwrap();

    let create = catalog.io_file_types("create", "cd").unwrap();
    assert_eq!(create.inputs, vec!["cue", "gdi", "toc"]);
    assert_eq!(create.outputs, vec!["chd"]);

    let extract = catalog.io_file_types("extract", "hd").unwrap();
    assert_eq!(extract.inputs, vec!["chd"]);
    assert_eq!(extract.outputs, vec!["img", "hdd"]);

    let verify = catalog.io_file_types("verify", "cd").unwrap();
    assert_eq!(verify.inputs, vec!["chd"]);
    assert!(!verify.produces_output());
}

#[test]
fn verb_appends_media_for_create_and_extract_only() {
    let catalog = Catalog::embedded().unwrap();
    assert_eq!(catalog.verb("create", "cd").unwrap(), "createcd");
    assert_eq!(catalog.verb("extract", "ld").unwrap(), "extractld");
    assert_eq!(catalog.verb("verify", "cd").unwrap(), "verify");
    assert!(catalog.verb("create", "floppy").is_err());
}

#[test]
fn job_ids_cannot_escape_the_resource_directory() {
    let catalog = Catalog::embedded().unwrap();
    assert!(matches!(
        catalog.job_options("../media_types"),
        Err(Error::InvalidArgument(_))
    ));
}

fn write_base(dir: &TempDir) {
    fs::create_dir_all(dir.path().join("jobs_opts")).unwrap();
    fs::write(
        dir.path().join("jobs_types.json"),
        r#"[ { "job_id": "create", "text": "Create" } ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("media_types.json"),
        r#"[ { "media_id": "cd", "text": "CD", "file_types": ["cue"] },
             { "media_id": "hd", "text": "HD", "file_types": ["img"] } ]"#,
    )
    .unwrap();
}
