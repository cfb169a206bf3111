use thiserror::Error;

/// Integration mistakes detectable from the props alone.
///
/// These surface while wiring a control up and are not meant to be recovered from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("icon glyph must be a single character: {icon:?}")]
    InvalidIcon { icon: String },
    #[error("invalid value `{value}`: no option carries it")]
    UnknownValue { value: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DropdownError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The highlighted id no longer names a selectable value, which indicates a bug.
    #[error("invariant violation: option {id} is not a selectable value")]
    InvariantViolation { id: usize },
}

pub type Result<T, E = DropdownError> = std::result::Result<T, E>;
