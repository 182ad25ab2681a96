use thiserror::Error;

/// An error reported by a [`ReferenceSystemEngine`](crate::ReferenceSystemEngine).
///
/// Engines are free to fail for their own reasons; the message is carried through
/// unchanged so that callers see what the underlying library said.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        EngineError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("Malformed ESRI projection string: {0}")]
    MalformedDescriptor(String),
    #[error("Unknown projection: {0}")]
    UnknownProjection(String),
    #[error("The engine rejected the reference system definition: {0}")]
    InvalidReferenceSystem(#[source] EngineError),
    #[error("No transformation available from `{source_name}` to `{dest_name}`")]
    UnsupportedTransform {
        source_name: String,
        dest_name: String,
        #[source]
        cause: EngineError,
    },
    #[error("The coordinate could not be transformed: {0}")]
    TransformFailed(#[source] EngineError),
    #[error("Couldn't convert coordinate to or from f64")]
    FloatConversion,
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_unsupported_transform_message() {
        let err = ProjError::UnsupportedTransform {
            source_name: "longlat".to_string(),
            dest_name: "merc".to_string(),
            cause: EngineError::new("no operation found"),
        };
        assert_eq!(
            err.to_string(),
            "No transformation available from `longlat` to `merc`"
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "no operation found");
        assert!(source.source().is_none());
    }
}
