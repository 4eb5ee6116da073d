mod options_grid;
mod state;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use adw::prelude::*;
use gtk4 as gtk;
use gtk::{gio, glib};

use chdgui_core::command::JobRequest;
use chdgui_core::config::AppConfig;
use chdgui_core::form::OptionsForm;
use chdgui_core::inputs::InputList;
use chdgui_core::schema::Catalog;
use chdgui_core::IoFileTypes;

use options_grid::build_options_grid;
use state::{SharedState, UiState};

const APP_ID: &str = "io.github.chdgui";
const IDLE_STATUS: &str = "Status: Idle";

pub fn run() -> chdgui_core::Result<()> {
    let config = AppConfig::load()?;
    let catalog = Catalog::load(config.resource_store())?;
    log::info!(
        "loaded {} job types and {} media types",
        catalog.jobs().len(),
        catalog.media().len()
    );

    if let Err(err) = adw::init() {
        eprintln!("libadwaita init failed: {err}");
    }

    let app = adw::Application::new(Some(APP_ID), gio::ApplicationFlags::empty());
    let ui_state: SharedState = Rc::new(RefCell::new(None));

    let quit = gio::SimpleAction::new("quit", None);
    quit.connect_activate(glib::clone!(
        #[weak]
        app,
        move |_, _| app.quit()
    ));
    app.add_action(&quit);
    app.set_accels_for_action("app.quit", &["<primary>q"]);

    let about = gio::SimpleAction::new("about", None);
    about.connect_activate(glib::clone!(
        #[weak]
        app,
        move |_, _| {
            if let Some(window) = app.active_window() {
                let dialog = gtk::AboutDialog::builder()
                    .transient_for(&window)
                    .modal(true)
                    .program_name("chdgui")
                    .version(env!("CARGO_PKG_VERSION"))
                    .comments("Graphical front-end for MAME's chdman.")
                    .build();
                dialog.present();
            }
        }
    ));
    app.add_action(&about);

    let app_menu = gio::Menu::new();
    app_menu.append(Some("About"), Some("app.about"));
    app_menu.append(Some("Exit"), Some("app.quit"));

    let ui_state_for_activate = ui_state.clone();
    app.connect_activate(move |app| {
        build_window(
            app,
            &app_menu,
            ui_state_for_activate.clone(),
            config.clone(),
            catalog.clone(),
        );
    });

    let ui_state_for_shutdown = ui_state.clone();
    app.connect_shutdown(move |_| {
        persist_output_dir(&ui_state_for_shutdown);
    });

    app.run();
    Ok(())
}

fn build_window(
    app: &adw::Application,
    app_menu: &gio::Menu,
    ui_state: SharedState,
    config: AppConfig,
    catalog: Catalog,
) {
    let window = adw::ApplicationWindow::new(app);
    window.set_title(Some("chdgui"));
    window.set_default_size(820, 720);

    let header = adw::HeaderBar::new();
    let menu_button = gtk::MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");
    let popover = gtk::PopoverMenu::from_model(Some(app_menu));
    menu_button.set_popover(Some(&popover));
    header.pack_end(&menu_button);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let job_names: Vec<&str> = catalog.jobs().iter().map(|job| job.text.as_str()).collect();
    let job_dropdown = gtk::DropDown::from_strings(&job_names);
    let media_names: Vec<&str> = catalog
        .media()
        .iter()
        .map(|media| media.text.as_str())
        .collect();
    let media_dropdown = gtk::DropDown::from_strings(&media_names);

    let selection_row = row();
    selection_row.append(&gtk::Label::new(Some("Job type:")));
    selection_row.append(&job_dropdown);
    selection_row.append(&gtk::Label::new(Some("Media type:")));
    selection_row.append(&media_dropdown);
    content.append(&selection_row);

    content.append(&section_header("Input files"));

    let add_files_button = gtk::Button::with_label("Add files");
    let add_dir_button = gtk::Button::with_label("Add a directory");
    let accepted_label = gtk::Label::new(None);
    let inputs_row = row();
    inputs_row.append(&add_files_button);
    inputs_row.append(&add_dir_button);
    inputs_row.append(&gtk::Label::new(Some("Accepted input file types:")));
    inputs_row.append(&accepted_label);
    content.append(&inputs_row);

    let inputs_list = gtk::ListBox::new();
    inputs_list.set_selection_mode(gtk::SelectionMode::Multiple);
    let inputs_scroller = gtk::ScrolledWindow::builder()
        .child(&inputs_list)
        .min_content_height(150)
        .build();
    content.append(&inputs_scroller);

    let select_all_button = gtk::Button::with_label("Select all");
    let remove_button = gtk::Button::with_label("Remove");
    let list_actions_row = row();
    list_actions_row.append(&select_all_button);
    list_actions_row.append(&remove_button);
    content.append(&list_actions_row);

    let output_dir = config.output_dir();
    let output_entry = gtk::Entry::new();
    output_entry.set_editable(false);
    output_entry.set_hexpand(true);
    output_entry.set_text(&output_dir.to_string_lossy());
    let output_dir_button = gtk::Button::with_label("Select directory");
    let output_row = row();
    output_row.append(&gtk::Label::new(Some("Output directory:")));
    output_row.append(&output_entry);
    output_row.append(&output_dir_button);
    content.append(&output_row);

    let output_ext_model = gtk::StringList::new(&[]);
    let output_ext_dropdown =
        gtk::DropDown::new(Some(output_ext_model.clone()), None::<gtk::Expression>);
    let run_button = gtk::Button::with_label("Run job");
    run_button.add_css_class("suggested-action");
    let ext_row = row();
    ext_row.append(&gtk::Label::new(Some("Output file type:")));
    ext_row.append(&output_ext_dropdown);
    ext_row.append(&run_button);
    content.append(&ext_row);

    content.append(&section_header("Job options"));

    let options_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let options_scroller = gtk::ScrolledWindow::builder()
        .child(&options_container)
        .vexpand(true)
        .build();
    content.append(&options_scroller);

    let status_label = gtk::Label::new(Some(IDLE_STATUS));
    status_label.set_xalign(0.0);
    status_label.set_margin_start(12);
    status_label.set_margin_end(12);
    status_label.set_margin_top(6);
    status_label.set_margin_bottom(6);

    let toolbar = adw::ToolbarView::new();
    toolbar.add_top_bar(&header);
    toolbar.add_bottom_bar(&status_label);
    toolbar.set_content(Some(&content));
    window.set_content(Some(&toolbar));

    let chdman = config.chdman();
    *ui_state.borrow_mut() = Some(UiState {
        catalog,
        config,
        chdman,
        form: OptionsForm::default(),
        form_generation: 0,
        io_types: IoFileTypes::default(),
        inputs: InputList::new(),
        output_dir,
        job_dropdown: job_dropdown.clone(),
        media_dropdown: media_dropdown.clone(),
        accepted_label,
        inputs_list,
        output_entry,
        output_ext_model,
        output_ext_dropdown,
        options_container,
        status_label,
    });
    refresh_selection(&ui_state);

    job_dropdown.connect_selected_notify(glib::clone!(
        #[strong]
        ui_state,
        move |_| refresh_selection(&ui_state)
    ));
    media_dropdown.connect_selected_notify(glib::clone!(
        #[strong]
        ui_state,
        move |_| refresh_selection(&ui_state)
    ));

    add_files_button.connect_clicked(glib::clone!(
        #[weak]
        window,
        #[strong]
        ui_state,
        move |_| {
            let accepted = accepted_inputs(&ui_state);
            let window = window.clone();
            let ui_state = ui_state.clone();
            glib::MainContext::ref_thread_default().spawn_local(async move {
                let dialog = gtk::FileDialog::new();
                dialog.set_title("Select input files");
                if !accepted.is_empty() {
                    let filter = gtk::FileFilter::new();
                    filter.set_name(Some(&format!("Accepted inputs ({})", accepted.join(", "))));
                    for ext in &accepted {
                        filter.add_suffix(ext);
                    }
                    let filters = gio::ListStore::new::<gtk::FileFilter>();
                    filters.append(&filter);
                    dialog.set_filters(Some(&filters));
                    dialog.set_default_filter(Some(&filter));
                }
                match dialog.open_multiple_future(Some(&window)).await {
                    Ok(files) => {
                        let paths: Vec<PathBuf> = (0..files.n_items())
                            .filter_map(|i| files.item(i).and_downcast::<gio::File>())
                            .filter_map(|file| file.path())
                            .collect();
                        update_inputs(&ui_state, |state| {
                            let added = state.inputs.add_files(paths);
                            log::info!("added {added} input file(s)");
                        });
                    }
                    Err(err) => log::debug!("file selection dismissed: {err}"),
                }
            });
        }
    ));

    add_dir_button.connect_clicked(glib::clone!(
        #[weak]
        window,
        #[strong]
        ui_state,
        move |_| {
            let window = window.clone();
            let ui_state = ui_state.clone();
            glib::MainContext::ref_thread_default().spawn_local(async move {
                let dialog = gtk::FileDialog::new();
                dialog.set_title("Select a directory of inputs");
                match dialog.select_folder_future(Some(&window)).await {
                    Ok(folder) => {
                        let Some(path) = folder.path() else {
                            return;
                        };
                        update_inputs(&ui_state, |state| {
                            match state.inputs.add_directory(&path, &state.io_types.inputs) {
                                Ok(added) => {
                                    log::info!(
                                        "added {added} input file(s) from {}",
                                        path.display()
                                    );
                                    state.status_label.set_text(IDLE_STATUS);
                                }
                                Err(err) => {
                                    log::warn!("scan of {} failed: {err}", path.display());
                                    state
                                        .status_label
                                        .set_text(&format!("Status: Scan failed: {err}"));
                                }
                            }
                        });
                    }
                    Err(err) => log::debug!("directory selection dismissed: {err}"),
                }
            });
        }
    ));

    select_all_button.connect_clicked(glib::clone!(
        #[strong]
        ui_state,
        move |_| {
            if let Some(state) = ui_state.borrow().as_ref() {
                state.inputs_list.select_all();
            }
        }
    ));

    remove_button.connect_clicked(glib::clone!(
        #[strong]
        ui_state,
        move |_| {
            update_inputs(&ui_state, |state| {
                let indices: Vec<usize> = state
                    .inputs_list
                    .selected_rows()
                    .iter()
                    .filter_map(|row| usize::try_from(row.index()).ok())
                    .collect();
                state.inputs.remove(&indices);
            });
        }
    ));

    output_dir_button.connect_clicked(glib::clone!(
        #[weak]
        window,
        #[strong]
        ui_state,
        move |_| {
            let window = window.clone();
            let ui_state = ui_state.clone();
            glib::MainContext::ref_thread_default().spawn_local(async move {
                let dialog = gtk::FileDialog::new();
                dialog.set_title("Select output directory");
                if let Ok(folder) = dialog.select_folder_future(Some(&window)).await {
                    let Some(path) = folder.path() else {
                        return;
                    };
                    if let Some(state) = ui_state.borrow_mut().as_mut() {
                        state.output_entry.set_text(&path.to_string_lossy());
                        state.output_dir = path;
                    }
                }
            });
        }
    ));

    run_button.connect_clicked(glib::clone!(
        #[strong]
        ui_state,
        move |_| run_job(&ui_state)
    ));

    window.present();
}

fn row() -> gtk::Box {
    gtk::Box::new(gtk::Orientation::Horizontal, 8)
}

fn section_header(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.set_xalign(0.0);
    label.add_css_class("title-4");
    label
}

fn accepted_inputs(ui_state: &SharedState) -> Vec<String> {
    ui_state
        .borrow()
        .as_ref()
        .map(|state| state.io_types.inputs.clone())
        .unwrap_or_default()
}

/// Recomputes everything that depends on the job/media pair: accepted
/// input types, output types and the options grid.
fn refresh_selection(ui_state: &SharedState) {
    let Ok(mut guard) = ui_state.try_borrow_mut() else {
        return;
    };
    let Some(state) = guard.as_mut() else {
        return;
    };
    let (Some(job_id), Some(media_id)) = (state.current_job_id(), state.current_media_id()) else {
        return;
    };

    state.io_types = match state.catalog.io_file_types(&job_id, &media_id) {
        Ok(types) => types,
        Err(err) => {
            log::error!("file types for {job_id}/{media_id}: {err}");
            IoFileTypes::default()
        }
    };
    let accepted = state.io_types.inputs.join(", ");
    state
        .accepted_label
        .set_markup(&format!("<b>{}</b>", glib::markup_escape_text(&accepted)));

    let outputs: Vec<&str> = state.io_types.outputs.iter().map(String::as_str).collect();
    state
        .output_ext_model
        .splice(0, state.output_ext_model.n_items(), &outputs);
    state.output_ext_dropdown.set_sensitive(!outputs.is_empty());

    state.form = match OptionsForm::for_selection(&state.catalog, &job_id, &media_id, &state.chdman)
    {
        Ok(form) => {
            state.status_label.set_text(IDLE_STATUS);
            form
        }
        Err(err) => {
            log::error!("options for {job_id}/{media_id}: {err}");
            state
                .status_label
                .set_text(&format!("Status: Options unavailable: {err}"));
            OptionsForm::default()
        }
    };
    state.form_generation += 1;

    while let Some(child) = state.options_container.first_child() {
        state.options_container.remove(&child);
    }
    let grid = build_options_grid(
        &state.form,
        state.config.max_options_per_column,
        state.form_generation,
        ui_state.clone(),
    );
    state.options_container.append(&grid);
}

fn update_inputs<F>(ui_state: &SharedState, apply: F)
where
    F: FnOnce(&mut UiState),
{
    let Ok(mut guard) = ui_state.try_borrow_mut() else {
        return;
    };
    let Some(state) = guard.as_mut() else {
        return;
    };
    apply(state);

    state.inputs_list.remove_all();
    for path in state.inputs.paths() {
        let label = gtk::Label::new(Some(&path.to_string_lossy()));
        label.set_xalign(0.0);
        state.inputs_list.append(&label);
    }
}

/// Runs every command in turn on the UI thread; the window is
/// unresponsive until the batch finishes.
fn run_job(ui_state: &SharedState) {
    let Ok(guard) = ui_state.try_borrow() else {
        return;
    };
    let Some(state) = guard.as_ref() else {
        return;
    };
    let (Some(job_id), Some(media_id)) = (state.current_job_id(), state.current_media_id()) else {
        return;
    };
    if state.inputs.is_empty() {
        state.status_label.set_text("Status: No input files");
        return;
    }

    let request = JobRequest {
        job_id,
        media_id,
        inputs: state.inputs.paths().to_vec(),
        output_dir: state.output_dir.clone(),
        output_ext: state.selected_output_ext(),
        options: state.form.selected_flags(),
    };
    let commands = state.chdman.commands(&request);
    let summary = state.chdman.run_all(&commands);
    state.status_label.set_text(&format!(
        "Status: Ran {} of {} command(s)",
        summary.launched,
        commands.len()
    ));
}

fn persist_output_dir(ui_state: &SharedState) {
    let Some(state) = ui_state.borrow_mut().take() else {
        return;
    };
    let path = AppConfig::default_path();
    if let Err(err) = AppConfig::remember_output_dir(&path, &state.output_dir) {
        log::warn!("failed to save {}: {err}", path.display());
    }
}
