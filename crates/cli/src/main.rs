mod args;

use std::path::Path;

use clap::Parser;

use chdgui_core::chdman::Chdman;
use chdgui_core::command::JobRequest;
use chdgui_core::config::AppConfig;
use chdgui_core::form::{FieldInput, OptionsForm};
use chdgui_core::inputs::InputList;
use chdgui_core::logging::{self, LogDestination};
use chdgui_core::schema::Catalog;
use chdgui_core::{Error, Result, WidgetKind};

use crate::args::{Cli, Commands, RunArgs};

fn main() {
    if let Err(err) = real_main() {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    logging::initialize(LogDestination::Terminal, level);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(chdman) = cli.chdman {
        config.chdman_path = chdman;
    }
    let chdman = config.chdman();
    let catalog = Catalog::load(config.resource_store())?;

    match cli.command {
        Commands::Jobs => {
            for job in catalog.jobs() {
                println!("{:<10} {}", job.job_id, job.text);
            }
            Ok(())
        }
        Commands::Media => {
            for media in catalog.media() {
                println!(
                    "{:<6} {:<12} {}",
                    media.media_id,
                    media.text,
                    media.file_types.join(", ")
                );
            }
            Ok(())
        }
        Commands::Options { job, media } => print_options(&catalog, &chdman, &job, &media),
        Commands::Templates => {
            for template in chdman.list_templates()? {
                println!(
                    "{:>3}  {:<14} {:<16} {:>5} {:>5} {:>5}  {}",
                    template.id,
                    template.manufacturer,
                    template.model,
                    template.cylinders,
                    template.heads,
                    template.sectors,
                    template.size
                );
            }
            Ok(())
        }
        Commands::Run(run) => run_job(&catalog, &chdman, &config, run),
    }
}

fn print_options(catalog: &Catalog, chdman: &Chdman, job: &str, media: &str) -> Result<()> {
    catalog.job(job)?;
    catalog.media_type(media)?;
    let form = OptionsForm::for_selection(catalog, job, media, chdman)?;
    if form.is_empty() {
        println!("{job}/{media} has no options");
        return Ok(());
    }

    for field in form.fields() {
        let kind = match &field.descriptor.widget {
            WidgetKind::None => "toggle",
            WidgetKind::Text => "text",
            WidgetKind::Choice(_) => "choice",
        };
        println!("--{:<16} {:<7} {}", field.flag(), kind, field.descriptor.desc);
        if let FieldInput::Choice { values, .. } = &field.input {
            for choice in values {
                println!("{:>28}{}", "", choice.label);
            }
        }
    }
    Ok(())
}

fn run_job(catalog: &Catalog, chdman: &Chdman, config: &AppConfig, run: RunArgs) -> Result<()> {
    let verb = catalog.verb(&run.job, &run.media)?;
    let io_types = catalog.io_file_types(&run.job, &run.media)?;

    let output_ext = match run.ext {
        Some(ext) if io_types.outputs.contains(&ext) => Some(ext),
        Some(ext) => {
            return Err(Error::InvalidArgument(format!(
                "{verb} cannot produce .{ext} (expected one of: {})",
                io_types.outputs.join(", ")
            )))
        }
        None => io_types.outputs.first().cloned(),
    };

    let mut form = OptionsForm::for_selection(catalog, &run.job, &run.media, chdman)?;
    for (flag, value) in &run.opts {
        let index = form.position(flag).ok_or_else(|| {
            Error::InvalidArgument(format!("{verb} has no option `{flag}`"))
        })?;
        form.set_enabled(index, true)?;
        form.set_value(index, value)?;
    }

    let mut inputs = InputList::new();
    for input in &run.inputs {
        if input.is_dir() {
            inputs.add_directory(input, &io_types.inputs)?;
        } else {
            inputs.add_files([input.clone()]);
        }
    }
    if inputs.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "no inputs matching: {}",
            io_types.inputs.join(", ")
        )));
    }

    let request = JobRequest {
        job_id: run.job,
        media_id: run.media,
        inputs: inputs.paths().to_vec(),
        output_dir: run.output_dir.unwrap_or_else(|| config.output_dir()),
        output_ext,
        options: form.selected_flags(),
    };
    let commands = chdman.commands(&request);

    if run.dry_run {
        for command in &commands {
            println!("{}", command.display());
        }
        return Ok(());
    }

    if request.output_ext.is_some() {
        ensure_dir(&request.output_dir)?;
    }
    let summary = chdman.run_all(&commands);
    println!("ran {} of {} commands", summary.launched, commands.len());
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "output directory does not exist: {}",
            path.to_string_lossy()
        )));
    }
    Ok(())
}
