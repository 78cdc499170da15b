//! Error handling for merge operations
//!
//! Only two failures are fatal to a merge: the data source could not be
//! loaded, or the document tree is missing a mandatory part. Everything
//! else degrades locally and is recorded in a [`MergeReport`].
//!
//! [`MergeReport`]: super::report::MergeReport

use std::fmt;

/// Fatal merge error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Data source missing, unreadable or malformed
    DataLoad {
        message: String,
        position: Option<u64>,
    },
    /// Document tree lacks a mandatory part (body, primary document part)
    Structural { message: String },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::DataLoad { message, position } => {
                if let Some(pos) = position {
                    write!(f, "Data load error at byte {}: {}", pos, message)
                } else {
                    write!(f, "Data load error: {}", message)
                }
            }
            MergeError::Structural { message } => {
                write!(f, "Structural error: {}", message)
            }
        }
    }
}

impl std::error::Error for MergeError {}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        MergeError::DataLoad {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::Error> for MergeError {
    fn from(err: quick_xml::Error) -> Self {
        MergeError::DataLoad {
            message: format!("malformed XML: {}", err),
            position: None,
        }
    }
}

/// Result type for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

// Convenience constructors for errors
impl MergeError {
    pub fn data_load(message: impl Into<String>) -> Self {
        MergeError::DataLoad {
            message: message.into(),
            position: None,
        }
    }

    pub fn data_load_at(message: impl Into<String>, position: u64) -> Self {
        MergeError::DataLoad {
            message: message.into(),
            position: Some(position),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        MergeError::Structural {
            message: message.into(),
        }
    }

    pub fn is_data_load(&self) -> bool {
        matches!(self, MergeError::DataLoad { .. })
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, MergeError::Structural { .. })
    }
}
