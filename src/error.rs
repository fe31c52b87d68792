use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No GitHub token provided. Pass --token, set GITHUB_TOKEN, or add it to the config file.")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("`{0}` is not an allowed path")]
    InvalidReportPath(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<octocrab::Error> for ReportError {
    fn from(err: octocrab::Error) -> Self {
        ReportError::GitHub(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
