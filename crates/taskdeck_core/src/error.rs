use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidInput(String),
    InvalidData(String),
    Io(String),
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

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) => message,
            Self::InvalidData(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn io_errors_convert_to_io_code() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(source);
        assert_eq!(err.code(), "io_error");
        assert!(err.message().contains("denied"));
    }

    #[test]
    fn serde_errors_convert_to_invalid_data() {
        let source = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
        let err = AppError::from(source);
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn display_joins_code_and_message() {
        let err = AppError::invalid_input("title is required");
        assert_eq!(err.to_string(), "invalid_input - title is required");
    }
}
