use std::fmt;

/// A draw was aborted because a named program input could not be resolved.
///
/// The frame continues; only the offending shape is skipped.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BindError {
    AttributeNotFound { shape: &'static str, attribute: &'static str },
    UniformNotFound { shape: &'static str, uniform: &'static str },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::AttributeNotFound { shape, attribute } => {
                write!(f, "{shape}: failed to get the storage location of attribute {attribute}")
            }
            BindError::UniformNotFound { shape, uniform } => {
                write!(f, "{shape}: failed to get the storage location of uniform {uniform}")
            }
        }
    }
}

impl std::error::Error for BindError {}
