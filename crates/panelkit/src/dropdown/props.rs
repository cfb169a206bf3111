use std::fmt;
use std::fmt::Display;

use ratatui::text::Span;

use super::option::DropdownOption;
use super::option::OptionId;
use super::option::index_of_value;
use crate::error::ConfigurationError;

/// Leading icon shown in the anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Icon {
    /// A single character; anything longer is rejected.
    Glyph(String),
    /// A pre-styled span from an icon set, drawn as-is.
    Styled(Span<'static>),
}

impl Icon {
    pub fn glyph(glyph: impl Into<String>) -> Self {
        Self::Glyph(glyph.into())
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Glyph(glyph) if glyph.chars().count() != 1 => {
                Err(ConfigurationError::InvalidIcon {
                    icon: glyph.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Anchor decoration. Has no effect on behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownVariant {
    Border,
    Underline,
}

/// What a commit reports to [`ChangeHandler::on_change`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangeEvent<'a, V> {
    pub id: OptionId,
    pub value: &'a V,
    pub name: Option<&'a str>,
}

/// Receives committed selections. Both methods run exactly once per commit, and both default to
/// doing nothing.
pub trait ChangeHandler<V> {
    fn on_change(&mut self, _event: &ChangeEvent<'_, V>) {}

    fn on_value_change(&mut self, _value: &V, _name: Option<&str>) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl<V> ChangeHandler<V> for NoopHandler {}

/// Adapts a closure to [`ChangeHandler::on_value_change`].
pub struct OnValueChange<F>(pub F);

impl<V, F> ChangeHandler<V> for OnValueChange<F>
where
    F: FnMut(&V, Option<&str>),
{
    fn on_value_change(&mut self, value: &V, name: Option<&str>) {
        (self.0)(value, name);
    }
}

/// Everything the caller supplies for one frame of a dropdown.
///
/// Props are cheap to build and are expected to be rebuilt every frame from app state. Building
/// them validates the value and icon, so an invalid configuration never reaches the control.
pub struct DropdownProps<'a, V> {
    options: &'a [DropdownOption<V>],
    value: Option<&'a V>,
    disabled: bool,
    icon: Option<Icon>,
    name: Option<&'a str>,
    placeholder: Option<&'a str>,
    variant: Option<DropdownVariant>,
    handler: Box<dyn ChangeHandler<V> + 'a>,
}

impl<'a, V> DropdownProps<'a, V>
where
    V: PartialEq + Display,
{
    /// Fails when `value` is set but no value option carries it.
    pub fn new(
        options: &'a [DropdownOption<V>],
        value: Option<&'a V>,
    ) -> Result<Self, ConfigurationError> {
        let props = Self {
            options,
            value,
            disabled: false,
            icon: None,
            name: None,
            placeholder: None,
            variant: None,
            handler: Box::new(NoopHandler),
        };
        props.validate_value()?;
        Ok(props)
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Result<Self, ConfigurationError> {
        icon.validate()?;
        self.icon = Some(icon);
        Ok(self)
    }

    /// Passed through to the change handler to tell fields of one form apart.
    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_variant(mut self, variant: DropdownVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_handler(mut self, handler: impl ChangeHandler<V> + 'a) -> Self {
        self.handler = Box::new(handler);
        self
    }

    pub fn on_value_change(self, f: impl FnMut(&V, Option<&str>) + 'a) -> Self {
        self.with_handler(OnValueChange(f))
    }

    /// Id of the option carrying the current value.
    ///
    /// Errors when the value is set but missing from the options.
    pub fn validate_value(&self) -> Result<Option<OptionId>, ConfigurationError> {
        match (self.value, index_of_value(self.options, self.value)) {
            (Some(value), None) => Err(ConfigurationError::UnknownValue {
                value: value.to_string(),
            }),
            (_, index) => Ok(index),
        }
    }

    pub(crate) fn notify_commit(&mut self, id: OptionId, value: &V) {
        let name = self.name;
        self.handler.on_value_change(value, name);
        self.handler.on_change(&ChangeEvent { id, value, name });
    }
}

impl<'a, V> DropdownProps<'a, V> {
    pub fn options(&self) -> &'a [DropdownOption<V>] {
        self.options
    }

    pub fn value(&self) -> Option<&'a V> {
        self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    pub fn placeholder(&self) -> Option<&'a str> {
        self.placeholder
    }

    pub fn variant(&self) -> Option<DropdownVariant> {
        self.variant
    }
}

impl<V: fmt::Debug> fmt::Debug for DropdownProps<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownProps")
            .field("options", &self.options)
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("icon", &self.icon)
            .field("name", &self.name)
            .field("placeholder", &self.placeholder)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}
