use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A level-construction step received a node count it cannot pair up.
    #[error("level must hold an even number of at least two nodes, got {0}")]
    UnpairedLevel(usize),

    /// A leaf with no data blocks reached the digest step.
    #[error("leaf has no data blocks")]
    EmptyLeaf,

    #[error("failed to deserialize: {0}")]
    FailedDeserialization(String),
}

impl From<hex::FromHexError> for Error {
    fn from(error: hex::FromHexError) -> Self {
        Error::FailedDeserialization(format!("{}", error))
    }
}
