use adw::prelude::*;
use gtk4 as gtk;
use gtk::glib;

use chdgui_core::form::{FieldInput, OptionsForm};

use crate::ui::state::SharedState;

const INPUT_WIDTH: i32 = 150;

/// One check button plus input widget per field, wrapped into extra
/// column pairs after `max_per_column` rows.
pub(crate) fn build_options_grid(
    form: &OptionsForm,
    max_per_column: usize,
    generation: u64,
    ui_state: SharedState,
) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.set_row_spacing(4);
    grid.set_column_spacing(12);

    for slot in form.layout(max_per_column) {
        let field = &form.fields()[slot.index];
        let index = slot.index;
        let column = (slot.column * 2) as i32;
        let row = slot.row as i32;

        let check = gtk::CheckButton::with_label(&field.descriptor.desc);
        check.set_tooltip_text(Some(&format!("--{}", field.flag())));
        check.set_active(field.enabled);
        check.connect_toggled(glib::clone!(
            #[strong]
            ui_state,
            move |cb| {
                let active = cb.is_active();
                with_form(&ui_state, generation, |form| form.set_enabled(index, active));
            }
        ));
        grid.attach(&check, column, row, 1, 1);

        let input: gtk::Widget = match &field.input {
            FieldInput::None => gtk::Label::new(None).upcast(),
            FieldInput::Text(text) => {
                let entry = gtk::Entry::new();
                entry.set_text(text);
                entry.connect_changed(glib::clone!(
                    #[strong]
                    ui_state,
                    move |entry| {
                        let text = entry.text().to_string();
                        with_form(&ui_state, generation, |form| form.set_text(index, text));
                    }
                ));
                entry.upcast()
            }
            FieldInput::Choice { values, selected } => {
                let labels: Vec<&str> = values.iter().map(|choice| choice.label.as_str()).collect();
                let dropdown = gtk::DropDown::from_strings(&labels);
                if let Some(selected) = selected {
                    dropdown.set_selected(*selected as u32);
                }
                dropdown.set_sensitive(!values.is_empty());
                dropdown.connect_selected_notify(glib::clone!(
                    #[strong]
                    ui_state,
                    move |dropdown| {
                        let choice = dropdown.selected() as usize;
                        with_form(&ui_state, generation, |form| form.select(index, choice));
                    }
                ));
                dropdown.upcast()
            }
        };
        input.set_size_request(INPUT_WIDTH, -1);
        grid.attach(&input, column + 1, row, 1, 1);
    }

    grid
}

fn with_form<F>(ui_state: &SharedState, generation: u64, apply: F)
where
    F: FnOnce(&mut OptionsForm) -> chdgui_core::Result<()>,
{
    let Ok(mut state) = ui_state.try_borrow_mut() else {
        return;
    };
    let Some(state) = state.as_mut() else {
        return;
    };
    if state.form_generation != generation {
        return;
    }
    if let Err(err) = apply(&mut state.form) {
        log::warn!("option update ignored: {err}");
    }
}
