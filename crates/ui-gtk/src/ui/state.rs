use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::prelude::*;

use chdgui_core::chdman::Chdman;
use chdgui_core::config::AppConfig;
use chdgui_core::form::OptionsForm;
use chdgui_core::inputs::InputList;
use chdgui_core::schema::Catalog;
use chdgui_core::IoFileTypes;

pub(crate) type SharedState = Rc<RefCell<Option<UiState>>>;

pub(crate) struct UiState {
    pub(crate) catalog: Catalog,
    pub(crate) config: AppConfig,
    pub(crate) chdman: Chdman,
    pub(crate) form: OptionsForm,
    /// Bumped on every rebuild so handlers of discarded widgets stay inert.
    pub(crate) form_generation: u64,
    pub(crate) io_types: IoFileTypes,
    pub(crate) inputs: InputList,
    pub(crate) output_dir: PathBuf,
    pub(crate) job_dropdown: gtk::DropDown,
    pub(crate) media_dropdown: gtk::DropDown,
    pub(crate) accepted_label: gtk::Label,
    pub(crate) inputs_list: gtk::ListBox,
    pub(crate) output_entry: gtk::Entry,
    pub(crate) output_ext_model: gtk::StringList,
    pub(crate) output_ext_dropdown: gtk::DropDown,
    pub(crate) options_container: gtk::Box,
    pub(crate) status_label: gtk::Label,
}

impl UiState {
    pub(crate) fn current_job_id(&self) -> Option<String> {
        self.catalog
            .jobs()
            .get(self.job_dropdown.selected() as usize)
            .map(|job| job.job_id.clone())
    }

    pub(crate) fn current_media_id(&self) -> Option<String> {
        self.catalog
            .media()
            .get(self.media_dropdown.selected() as usize)
            .map(|media| media.media_id.clone())
    }

    pub(crate) fn selected_output_ext(&self) -> Option<String> {
        let outputs = &self.io_types.outputs;
        outputs
            .get(self.output_ext_dropdown.selected() as usize)
            .or_else(|| outputs.first())
            .cloned()
    }
}
