use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid signature pattern: {0}")]
    InvalidPattern(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Hook {name}: {message}")]
    Hook { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn hook(name: &str, message: impl ToString) -> Self {
        Error::Hook {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_error_display() {
        let err = Error::hook("MemStream::Read", "target already patched");
        assert_eq!(
            err.to_string(),
            "Hook MemStream::Read: target already patched"
        );
    }
}
