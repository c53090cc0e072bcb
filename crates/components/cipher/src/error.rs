use std::fmt::Display;

/// A cipher error.
#[derive(Debug, thiserror::Error)]
pub struct CipherError {
    kind: ErrorKind,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CipherError {
    pub(crate) fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    pub(crate) fn key(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Key, msg.into())
    }

    pub(crate) fn counter(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Counter, msg.into())
    }

    pub(crate) fn window(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Window, msg.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ErrorKind {
    Key,
    Counter,
    Window,
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::Key => write!(f, "key error")?,
            ErrorKind::Counter => write!(f, "counter error")?,
            ErrorKind::Window => write!(f, "keystream window error")?,
        }

        if let Some(source) = &self.source {
            write!(f, " caused by: {}", source)?;
        }

        Ok(())
    }
}
