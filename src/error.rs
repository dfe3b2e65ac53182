use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The value is still reachable through other handles, typically commands held by a history.
    #[error("shared value still has {handles} live handles")]
    StillShared { handles: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
