use thiserror::Error as ThisError;

use crate::NodeId;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("tour references node {node} which is not part of the instance ({instance_len} nodes)")]
    UnknownNode { node: NodeId, instance_len: usize },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// True for errors caused by the content of an input rather than by I/O.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::InvalidData(_) | Self::UnknownNode { .. }
        )
    }
}
