use thiserror::Error as ThisError;

///
/// Error
///
/// Closed runtime taxonomy. Execution faults wrap whatever the store
/// collaborator produced, verbatim; the core never retries and never
/// swallows them.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// Malformed field annotation; fatal to the offending type.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A single-row lookup matched zero rows. Distinct from an
    /// execution failure; callers branch on it explicitly.
    #[error("row not found")]
    NotFound,

    /// Any failure surfaced by the store collaborator.
    #[error("execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a store-collaborator failure.
    pub fn execution(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Execution(err.into())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

///
/// ConfigError
///
/// Classification faults. Raised at first classification of the
/// offending type and returned again on every retry; never a partial
/// descriptor sequence.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("bad column qualifier `{qualifier}` on {type_name}::{field}")]
    BadQualifier {
        type_name: &'static str,
        field: &'static str,
        qualifier: &'static str,
    },

    #[error("field {type_name}::{field} is marked traverse but has no embedded field table")]
    NotTraversable {
        type_name: &'static str,
        field: &'static str,
    },
}

/// Downgrade [`Error::NotFound`] to `Ok(None)` for call sites that
/// treat absence as a normal outcome.
pub fn not_found_ok<T>(result: Result<T, Error>) -> Result<Option<T>, Error> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(Error::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_ok_downgrades_only_not_found() {
        assert_eq!(not_found_ok(Ok(1)).unwrap(), Some(1));
        assert_eq!(not_found_ok::<i32>(Err(Error::NotFound)).unwrap(), None);
        assert!(not_found_ok::<i32>(Err(Error::execution("boom"))).is_err());
    }

    #[test]
    fn config_faults_render_the_offender() {
        let err = Error::from(ConfigError::BadQualifier {
            type_name: "demo::User",
            field: "name",
            qualifier: "primary",
        });
        let text = err.to_string();
        assert!(text.contains("primary"));
        assert!(text.contains("demo::User"));
    }
}
