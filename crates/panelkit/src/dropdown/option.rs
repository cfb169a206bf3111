use std::borrow::Cow;
use std::fmt::Display;

/// Position of an option in the list it came from.
///
/// Ids are only meaningful for the list instance they were computed from.
pub type OptionId = usize;

#[derive(Clone, Debug, PartialEq)]
pub enum DropdownOption<V> {
    Header {
        label: String,
    },
    Separator,
    Value {
        value: V,
        text: Option<String>,
        disabled: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Header,
    Separator,
    Value,
}

impl<V> DropdownOption<V> {
    pub fn header(label: impl Into<String>) -> Self {
        Self::Header {
            label: label.into(),
        }
    }

    pub fn separator() -> Self {
        Self::Separator
    }

    pub fn value(value: V) -> Self {
        Self::Value {
            value,
            text: None,
            disabled: false,
        }
    }

    /// Sets the label shown instead of the raw value. No effect on headers and separators.
    pub fn with_text(mut self, label: impl Into<String>) -> Self {
        if let Self::Value { text, .. } = &mut self {
            *text = Some(label.into());
        }
        self
    }

    pub fn with_disabled(mut self, flag: bool) -> Self {
        if let Self::Value { disabled, .. } = &mut self {
            *disabled = flag;
        }
        self
    }

    pub fn as_value(&self) -> Option<&V> {
        match self {
            Self::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Value { disabled: true, .. })
    }

    /// Only enabled values can be highlighted or committed.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Value { disabled: false, .. })
    }
}

pub fn classify<V>(option: &DropdownOption<V>) -> OptionKind {
    match option {
        DropdownOption::Header { .. } => OptionKind::Header,
        DropdownOption::Separator => OptionKind::Separator,
        DropdownOption::Value { .. } => OptionKind::Value,
    }
}

/// Returns the id of the first value option equal to `value`.
///
/// `None` for a `None` value or a value no option carries. This is a plain lookup; callers that
/// require the value to exist validate separately.
pub fn index_of_value<V: PartialEq>(
    options: &[DropdownOption<V>],
    value: Option<&V>,
) -> Option<OptionId> {
    let value = value?;
    options
        .iter()
        .position(|option| option.as_value() == Some(value))
}

/// Text shown for an option: its `text`, else the value's `Display` form.
pub fn display_label<V: Display>(option: &DropdownOption<V>) -> Cow<'_, str> {
    match option {
        DropdownOption::Header { label } => Cow::Borrowed(label.as_str()),
        DropdownOption::Separator => Cow::Borrowed(""),
        DropdownOption::Value {
            text: Some(text), ..
        } => Cow::Borrowed(text.as_str()),
        DropdownOption::Value { value, .. } => Cow::Owned(value.to_string()),
    }
}

/// Ids of options that can take the highlight, in list order.
pub fn selectable_ids<V>(options: &[DropdownOption<V>]) -> impl Iterator<Item = OptionId> + '_ {
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.is_selectable())
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DropdownOption<i32>> {
        vec![
            DropdownOption::header("Numbers"),
            DropdownOption::value(1).with_text("One"),
            DropdownOption::separator(),
            DropdownOption::value(2).with_disabled(true),
            DropdownOption::value(3),
        ]
    }

    #[test]
    fn classify_matches_variant() {
        let options = sample();
        let kinds: Vec<OptionKind> = options.iter().map(classify).collect();
        assert_eq!(
            kinds,
            vec![
                OptionKind::Header,
                OptionKind::Value,
                OptionKind::Separator,
                OptionKind::Value,
                OptionKind::Value,
            ]
        );
    }

    #[test]
    fn index_of_value_ignores_headers_and_missing_values() {
        let options = sample();
        assert_eq!(index_of_value(&options, Some(&1)), Some(1));
        assert_eq!(index_of_value(&options, Some(&2)), Some(3));
        assert_eq!(index_of_value(&options, Some(&9)), None);
        assert_eq!(index_of_value(&options, None), None);
    }

    #[test]
    fn labels_prefer_text() {
        let options = sample();
        assert_eq!(display_label(&options[1]), "One");
        assert_eq!(display_label(&options[4]), "3");
        assert_eq!(display_label(&options[0]), "Numbers");
        assert_eq!(display_label(&options[2]), "");
    }

    #[test]
    fn disabled_values_are_not_selectable() {
        let options = sample();
        let ids: Vec<OptionId> = selectable_ids(&options).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(options[3].is_disabled());
        assert!(!options[0].is_disabled());
    }

    #[test]
    fn builders_leave_non_values_untouched() {
        let header: DropdownOption<i32> = DropdownOption::header("H")
            .with_text("x")
            .with_disabled(true);
        assert_eq!(header, DropdownOption::header("H"));
    }
}
