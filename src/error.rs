#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine ran but produced nothing usable. The only kind a `Chain`
    /// recovers from.
    #[error("No result found for user agent: {user_agent}")]
    NoResultFound { user_agent: String },
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("limitation exceeded: {0}")]
    LimitationExceeded(String),
    #[error("request error: {0}")]
    Request(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("package not loaded: {0}")]
    PackageNotLoaded(String),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn no_result(user_agent: &str) -> Self {
        Error::NoResultFound {
            user_agent: user_agent.to_string(),
        }
    }

    pub fn is_no_result(&self) -> bool {
        matches!(self, Error::NoResultFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
