use gltrace_util::Trace;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to translate function \"{name}\"")]
    TranslateFunction {
        name: String,
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
    #[error("Failed to translate return type")]
    TranslateResult {
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
    #[error("Failed to translate argument \"{name}\"")]
    TranslateArgument {
        name: String,
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
    #[error("Unknown type \"{name}\"")]
    UnknownType { name: String, source: Trace },
}

impl Error {
    /// Returns true if the cause of this error is ultimately a type missing from the catalogue
    pub fn is_unknown_type(&self) -> bool {
        if let crate::Error::UnknownType { .. } = self {
            return true;
        }

        use std::error::Error;
        if let Some(e) = self.source() {
            if let Some(e) = e.downcast_ref::<crate::error::Error>() {
                e.is_unknown_type()
            } else {
                false
            }
        } else {
            false
        }
    }

    /// The unrecognized spelling at the root of this error, if there is one
    pub fn unknown_type_name(&self) -> Option<&str> {
        if let crate::Error::UnknownType { name, .. } = self {
            return Some(name.as_str());
        }

        use std::error::Error;
        self.source()
            .and_then(|e| e.downcast_ref::<crate::error::Error>())
            .and_then(|e| e.unknown_type_name())
    }
}
