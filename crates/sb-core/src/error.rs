use thiserror::Error;

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct ScriptBookError {
    pub code: String,
    pub message: String,
    pub storage: Option<String>,
}

impl ScriptBookError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            storage: None,
        }
    }

    pub fn with_storage(
        code: impl Into<String>,
        message: impl Into<String>,
        storage: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            storage: Some(storage.into()),
        }
    }

    pub fn in_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(storage.into());
        self
    }
}
