use thiserror::Error;

use crate::parser::ParseError;

/// A conversion fault, before it is attributed to a parameter.
#[derive(Debug, Error)]
pub(crate) enum InvalidCapture {
    #[error("cannot convert '{token}' to {type_name}: {reason}.")]
    InvalidConversion {
        token: String,
        type_name: &'static str,
        reason: String,
    },
    #[error("'{token}' is not one of {choices}.")]
    NotInChoices { token: String, choices: String },
    #[error("unable to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl InvalidCapture {
    /// Attribute this fault to the parameter `name`.
    pub(crate) fn named(self, name: &str) -> ParseError {
        let name = name.to_string();

        match self {
            InvalidCapture::InvalidConversion {
                token,
                type_name,
                reason,
            } => ParseError::InvalidValue {
                name,
                token,
                type_name,
                reason,
            },
            InvalidCapture::NotInChoices { token, choices } => ParseError::ValueNotInChoices {
                name,
                token,
                choices,
            },
            InvalidCapture::Open { path, source } => {
                ParseError::ResourceOpenError { name, path, source }
            }
        }
    }
}

/// Behaviour to convert a raw token into the typed value T.
pub(crate) trait Convert<T> {
    fn convert(&self, token: &str) -> Result<T, InvalidCapture>;

    /// The value bound when the parameter is matched without any token.
    fn present(&self) -> Option<T> {
        None
    }
}
