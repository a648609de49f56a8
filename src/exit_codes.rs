//! Exit codes shared by `ascii-to-svg` and `profile-stats`.

use crate::error::{AnimationError, ConfigError, FetchError, JokeError, LoadError, PatchError};

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Error not covered by a more specific code
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Bad config file or missing environment variable
pub const EXIT_CONFIG_ERROR: i32 = 102;

/// File could not be read or written
pub const EXIT_IO_ERROR: i32 = 103;

/// GraphQL request failed or returned a non-200 status
pub const EXIT_FETCH_ERROR: i32 = 104;

/// Input document could not be parsed (SVG, jokes JSON)
pub const EXIT_DOCUMENT_ERROR: i32 = 105;

/// Pick the exit code for the first recognised error in the chain.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return EXIT_CONFIG_ERROR;
        }
        if cause.is::<FetchError>() {
            return EXIT_FETCH_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<PatchError>() {
            return match e {
                PatchError::Io { .. } => EXIT_IO_ERROR,
                PatchError::Xml { .. } => EXIT_DOCUMENT_ERROR,
            };
        }
        if let Some(e) = cause.downcast_ref::<JokeError>() {
            return match e {
                JokeError::Io { .. } => EXIT_IO_ERROR,
                JokeError::Json(_) | JokeError::Empty => EXIT_DOCUMENT_ERROR,
            };
        }
        if cause.is::<AnimationError>() {
            return EXIT_DOCUMENT_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<LoadError>() {
            return match e {
                LoadError::Io { .. } => EXIT_IO_ERROR,
                LoadError::Config(_) => EXIT_CONFIG_ERROR,
            };
        }
        if cause.is::<std::io::Error>() {
            return EXIT_IO_ERROR;
        }
    }
    EXIT_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn codes_follow_the_root_error() {
        let err = anyhow::Error::new(ConfigError::MissingEnv("ACCESS_TOKEN"));
        assert_eq!(exit_code_for(&err), EXIT_CONFIG_ERROR);

        let err: anyhow::Error = Err::<(), _>(JokeError::Empty)
            .context("loading jokes")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_DOCUMENT_ERROR);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = anyhow::Error::new(PatchError::Io {
            path: "README.md".into(),
            source: io,
        });
        assert_eq!(exit_code_for(&err), EXIT_IO_ERROR);

        let err = anyhow::Error::new(LoadError::Config(ConfigError::Invalid("duration".into())));
        assert_eq!(exit_code_for(&err), EXIT_CONFIG_ERROR);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), EXIT_ERROR);
    }
}
