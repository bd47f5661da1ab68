//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Domain failures travel inside
//! [`FrameworkError::EntityError`] and can be recovered with [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0} already exists")]
    Conflict(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Whether repeating the same request may succeed.
    ///
    /// Only deadlines count: a closed actor stays closed.
    pub fn is_transient(&self) -> bool {
        matches!(self, FrameworkError::Timeout(_))
    }

    /// Recovers the entity's own error type, or hands the error back unchanged.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of widgets")]
    struct WidgetError;

    #[test]
    fn downcast_recovers_typed_entity_error() {
        let err = FrameworkError::EntityError(Box::new(WidgetError));
        assert_eq!(err.downcast_entity::<WidgetError>().unwrap(), WidgetError);
    }

    #[test]
    fn downcast_returns_other_errors_untouched() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.downcast_entity::<WidgetError>().unwrap_err();
        assert!(back.to_string().contains("disk"));

        let closed = FrameworkError::ActorClosed.downcast_entity::<WidgetError>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }

    #[test]
    fn only_timeouts_are_transient() {
        assert!(FrameworkError::Timeout(10).is_transient());
        assert!(!FrameworkError::ActorClosed.is_transient());
        assert!(!FrameworkError::Conflict("x".into()).is_transient());
    }
}
