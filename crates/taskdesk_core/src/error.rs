use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid_input - {0}")]
    InvalidInput(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("io_error - {0}")]
    Io(String),
    #[error("transport_error - {0}")]
    Transport(String),
    #[error("server_error - HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("busy - {0}")]
    Busy(String),
    /// The photo upload step of a submission failed; no task call was made.
    #[error("upload_failed - {0}")]
    Upload(Box<AppError>),
    /// The create/update call of a submission failed.
    #[error("submit_failed - {0}")]
    Submit(Box<AppError>),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn transport<M: Into<String>>(message: M) -> Self {
        Self::Transport(message.into())
    }

    pub fn server<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn busy<M: Into<String>>(message: M) -> Self {
        Self::Busy(message.into())
    }

    pub fn upload(cause: AppError) -> Self {
        Self::Upload(Box::new(cause))
    }

    pub fn submit(cause: AppError) -> Self {
        Self::Submit(Box::new(cause))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
            Self::Transport(_) => "transport_error",
            Self::Server { .. } => "server_error",
            Self::Busy(_) => "busy",
            Self::Upload(_) => "upload_failed",
            Self::Submit(_) => "submit_failed",
        }
    }

    /// The innermost error, skipping the submission stage wrappers.
    pub fn root_cause(&self) -> &AppError {
        match self {
            Self::Upload(cause) | Self::Submit(cause) => cause.root_cause(),
            other => other,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::invalid_data(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::server(status.as_u16(), err.to_string());
        }
        Self::transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_data(err.to_string())
    }
}
