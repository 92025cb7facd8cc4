use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraderError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid service credentials: {0}")]
    Credentials(String),

    #[error("completion request failed (status {status}): {body}")]
    Completion { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("token exchange rejected (status {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("spreadsheet append rejected (status {status}): {body}")]
    Export { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("jwt signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraderError>;
