use core::fmt;
use std::error::Error;

/// A hash error.
///
/// Every variant is a contract violation by the caller: a declared length
/// which does not fit the supplied buffers, or an unsupported key.
#[derive(Debug, thiserror::Error)]
pub struct HashError {
    kind: ErrorKind,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl HashError {
    pub(crate) fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    pub(crate) fn length(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Length, msg.into())
    }

    pub(crate) fn key(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Key, msg.into())
    }
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
    Length,
    Key,
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Length => write!(f, "length error")?,
            ErrorKind::Key => write!(f, "key error")?,
        }

        if let Some(ref source) = self.source {
            write!(f, " caused by: {}", source)?;
        }

        Ok(())
    }
}
