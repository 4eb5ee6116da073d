//! Toolkit-independent model of the job options form.
//!
//! A form is rebuilt from scratch whenever the job or media selection
//! changes; front-ends render one row per [`FormField`] and feed user edits
//! back through the `set_*`/`select` methods.

use crate::error::{Error, Result};
use crate::models::{ChoiceSource, ChoiceValue, OptionDescriptor, WidgetKind};
use crate::schema::Catalog;
use crate::values::ValueResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    None,
    Text(String),
    Choice {
        values: Vec<ChoiceValue>,
        selected: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub descriptor: OptionDescriptor,
    pub enabled: bool,
    pub input: FieldInput,
}

impl FormField {
    pub fn flag(&self) -> &str {
        &self.descriptor.opt_id
    }

    /// Value passed after the flag: empty for toggles and unselected choices.
    pub fn value(&self) -> String {
        match &self.input {
            FieldInput::None => String::new(),
            FieldInput::Text(text) => text.clone(),
            FieldInput::Choice { values, selected } => selected
                .and_then(|idx| values.get(idx))
                .map(|choice| choice.value.clone())
                .unwrap_or_default(),
        }
    }
}

/// Grid position of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub index: usize,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsForm {
    fields: Vec<FormField>,
}

impl OptionsForm {
    pub fn build(descriptors: Vec<OptionDescriptor>, resolver: &dyn ValueResolver) -> Self {
        let fields = descriptors
            .into_iter()
            .map(|descriptor| {
                let input = match &descriptor.widget {
                    WidgetKind::None => FieldInput::None,
                    WidgetKind::Text => FieldInput::Text(String::new()),
                    WidgetKind::Choice(source) => {
                        let values = choice_values(&descriptor.opt_id, source, resolver);
                        let selected = if values.is_empty() { None } else { Some(0) };
                        FieldInput::Choice { values, selected }
                    }
                };
                FormField {
                    descriptor,
                    enabled: false,
                    input,
                }
            })
            .collect();
        Self { fields }
    }

    /// Builds the form for the current job/media selection.
    pub fn for_selection(
        catalog: &Catalog,
        job_id: &str,
        media_id: &str,
        resolver: &dyn ValueResolver,
    ) -> Result<Self> {
        let descriptors = catalog.options_for(job_id, media_id)?;
        log::debug!(
            "building options form for {job_id}/{media_id}: {} fields",
            descriptors.len()
        );
        Ok(Self::build(descriptors, resolver))
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, flag: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.flag() == flag)
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        self.field_mut(index)?.enabled = enabled;
        Ok(())
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let field = self.field_mut(index)?;
        match &mut field.input {
            FieldInput::Text(current) => {
                *current = text.into();
                Ok(())
            }
            _ => Err(Error::InvalidArgument(format!(
                "option `{}` does not take free text",
                field.descriptor.opt_id
            ))),
        }
    }

    pub fn select(&mut self, index: usize, choice: usize) -> Result<()> {
        let field = self.field_mut(index)?;
        match &mut field.input {
            FieldInput::Choice { values, selected } if choice < values.len() => {
                *selected = Some(choice);
                Ok(())
            }
            FieldInput::Choice { .. } => Err(Error::InvalidArgument(format!(
                "choice {choice} out of range for option `{}`",
                field.descriptor.opt_id
            ))),
            _ => Err(Error::InvalidArgument(format!(
                "option `{}` is not a choice",
                field.descriptor.opt_id
            ))),
        }
    }

    /// Selects the choice whose value equals `value`.
    pub fn select_value(&mut self, index: usize, value: &str) -> Result<()> {
        let field = self.field_mut(index)?;
        match &mut field.input {
            FieldInput::Choice { values, selected } => {
                match values.iter().position(|choice| choice.value == value) {
                    Some(choice) => {
                        *selected = Some(choice);
                        Ok(())
                    }
                    None => Err(Error::InvalidArgument(format!(
                        "`{value}` is not a valid value for option `{}`",
                        field.descriptor.opt_id
                    ))),
                }
            }
            _ => Err(Error::InvalidArgument(format!(
                "option `{}` is not a choice",
                field.descriptor.opt_id
            ))),
        }
    }

    /// Sets a field's input from its textual value, whatever its kind.
    pub fn set_value(&mut self, index: usize, value: &str) -> Result<()> {
        match &self.field(index)?.input {
            FieldInput::None if value.is_empty() => Ok(()),
            FieldInput::None => Err(Error::InvalidArgument(format!(
                "option `{}` takes no value",
                self.fields[index].descriptor.opt_id
            ))),
            FieldInput::Text(_) => self.set_text(index, value),
            FieldInput::Choice { .. } => self.select_value(index, value),
        }
    }

    /// Places field `k` at row `k % max_per_column`, column `k / max_per_column`.
    pub fn layout(&self, max_per_column: usize) -> Vec<FieldSlot> {
        let max = max_per_column.max(1);
        (0..self.fields.len())
            .map(|index| FieldSlot {
                index,
                row: index % max,
                column: index / max,
            })
            .collect()
    }

    /// `(flag, value)` for every enabled field, in form order.
    pub fn selected_flags(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|field| field.enabled)
            .map(|field| (field.flag().to_string(), field.value()))
            .collect()
    }

    fn field(&self, index: usize) -> Result<&FormField> {
        self.fields.get(index).ok_or_else(|| self.out_of_range(index))
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::InvalidArgument(format!(
            "option index {index} out of range ({} fields)",
            self.fields.len()
        ))
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut FormField> {
        if index >= self.fields.len() {
            return Err(self.out_of_range(index));
        }
        Ok(&mut self.fields[index])
    }
}

fn choice_values(
    opt_id: &str,
    source: &ChoiceSource,
    resolver: &dyn ValueResolver,
) -> Vec<ChoiceValue> {
    match source {
        ChoiceSource::Static(values) => values.iter().cloned().map(ChoiceValue::plain).collect(),
        ChoiceSource::Provider(provider) => match resolver.resolve(*provider) {
            Ok(values) => values,
            Err(err) => {
                log::warn!(
                    "could not compute values for `{opt_id}` ({}): {err}",
                    provider.name()
                );
                Vec::new()
            }
        },
    }
}
