use thiserror::Error;

/// Result type for relink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for relink operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A glob source maps to a target that also expands to many paths,
    /// so no 1:1 source-to-destination pairing exists
    #[error("Unclear where to move \"{source_pattern}\" when target is \"{target}\"")]
    MultipleTargets {
        source_pattern: String,
        target: String,
    },

    /// A glob source maps to a single flat directory, collapsing the
    /// matched files' directory structure
    #[error(
        "Moving multiple files \"{source_pattern}\" to a flat directory at \"{target}\" is not currently supported"
    )]
    FlatDirectory {
        source_pattern: String,
        target: String,
    },

    /// Parsing errors when processing source code
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Malformed glob pattern in the configuration
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates a pattern error
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Creates a multiple-targets conflict error, naming both patterns verbatim
    pub fn multiple_targets(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::MultipleTargets {
            source_pattern: source.into(),
            target: target.into(),
        }
    }

    /// Creates a flat-directory conflict error, naming both patterns verbatim
    pub fn flat_directory(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::FlatDirectory {
            source_pattern: source.into(),
            target: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_messages_name_patterns_verbatim() {
        let err = Error::multiple_targets("./fake/dir/**/*.js", "./**/*.js");
        assert_eq!(
            err.to_string(),
            "Unclear where to move \"./fake/dir/**/*.js\" when target is \"./**/*.js\""
        );

        let err = Error::flat_directory("./fake/dir/**/*.js", "/fake/other-dir");
        assert_eq!(
            err.to_string(),
            "Moving multiple files \"./fake/dir/**/*.js\" to a flat directory at \"/fake/other-dir\" is not currently supported"
        );
    }

    #[test]
    fn conflict_errors_have_no_underlying_cause() {
        use std::error::Error as _;

        let err = Error::multiple_targets("./a/*.js", "./b/*.js");
        assert!(err.source().is_none());

        let err = Error::flat_directory("./a/*.js", "/flat");
        assert!(err.source().is_none());
    }
}
