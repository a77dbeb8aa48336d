pub type ClipframeResult<T> = Result<T, ClipframeError>;

/// Errors surfaced by the cropper.
///
/// Only [`ClipframeError::MissingTarget`] and [`ClipframeError::UnsupportedShape`] belong to the
/// construction-time configuration family; everything else on the interactive path is a silent
/// no-op rather than an error.
#[derive(thiserror::Error, Debug)]
pub enum ClipframeError {
    /// No viewport surface was supplied.
    #[error("configuration error: a viewport surface is required")]
    MissingTarget,

    /// The mask shape is neither `rect` nor `circle`.
    #[error("configuration error: mask shape \"{0}\" is not supported (expected rect or circle)")]
    UnsupportedShape(String),

    /// A numeric or color option is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be turned into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// An output surface could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Anything else, with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClipframeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn unsupported_shape(shape: impl Into<String>) -> Self {
        Self::UnsupportedShape(shape.into())
    }

    /// `true` for the errors that make a cropper impossible to construct.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingTarget | Self::UnsupportedShape(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
