use thiserror::Error;

/// Errors reported when option values cannot be bound to their destinations.
///
/// Every variant describes a mismatch between a call site and the options a
/// function declared, so callers normally treat them as programming errors.
/// The `Display` form is stable and names the offending index and type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A destination was declared without a way to write to it
    #[error("{index}-th dest:&{type_name} is not writable")]
    InvalidDestination {
        index: usize,
        type_name: &'static str,
    },
    /// Two destinations declared the same type
    #[error("type of {index}-th dest:&mut {type_name} is dup")]
    DuplicateDestinationType {
        index: usize,
        type_name: &'static str,
    },
    /// Two option values of the same type were passed in one call
    #[error("type of {index}-th arg:{type_name} is dup")]
    DuplicateOptionType {
        index: usize,
        type_name: &'static str,
    },
    /// An option value's type has no destination
    ///
    /// `value` is the option's `Debug` form, e.g. `Name("a")` rather than `a`.
    #[error("{index}-th arg:{type_name}/{value} has no matching param type")]
    UnmatchedOptionType {
        index: usize,
        type_name: &'static str,
        value: String,
    },
}

impl BindError {
    /// Position of the offending destination or option in its sequence.
    pub fn index(&self) -> usize {
        match self {
            BindError::InvalidDestination { index, .. }
            | BindError::DuplicateDestinationType { index, .. }
            | BindError::DuplicateOptionType { index, .. }
            | BindError::UnmatchedOptionType { index, .. } => *index,
        }
    }

    /// Name of the offending type, as given by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        match self {
            BindError::InvalidDestination { type_name, .. }
            | BindError::DuplicateDestinationType { type_name, .. }
            | BindError::DuplicateOptionType { type_name, .. }
            | BindError::UnmatchedOptionType { type_name, .. } => type_name,
        }
    }

    /// True when the error was found while indexing destinations rather
    /// than while assigning options.
    pub fn is_destination_error(&self) -> bool {
        matches!(
            self,
            BindError::InvalidDestination { .. } | BindError::DuplicateDestinationType { .. }
        )
    }
}
