//! Error types for the nodepath library.
//!
//! Two classes of failure exist. Parse errors describe malformed path text and
//! are expected, recoverable conditions. Structural errors describe a broken
//! tree invariant (a parent-chain cycle) and signal a bug in tree
//! construction. A path that simply does not lead anywhere is neither: the
//! resolver reports it as `Ok(None)`.

use thiserror::Error;

use crate::tree::NodeId;

/// Result type alias for operations that may fail with a nodepath error.
///
/// # Examples
///
/// ```
/// use nodepath::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the nodepath library.
#[derive(Debug, Error)]
pub enum Error {
    /// Path text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A node name is empty or contains a reserved character.
    #[error("invalid node name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// The reason the name is invalid.
        reason: String,
    },

    /// A sibling with the same case-insensitive name already exists.
    #[error("a child named '{name}' already exists under '{parent}'")]
    DuplicateName {
        /// The conflicting name.
        name: String,
        /// Full path of the parent that already holds the name.
        parent: String,
    },

    /// Attaching the node would make it its own ancestor.
    #[error("cannot attach '{node}' under '{parent}': the node is an ancestor of its new parent")]
    WouldCreateCycle {
        /// Full path of the node being attached.
        node: String,
        /// Full path of the requested parent.
        parent: String,
    },

    /// The parent chain loops back on itself.
    #[error("cycle detected in parent chain at node '{node}' ({node_type})")]
    Cycle {
        /// Name of the node that was visited twice.
        node: String,
        /// Type name of the node payload.
        node_type: &'static str,
    },

    /// A node id does not belong to this tree.
    #[error("unknown node id {id}")]
    UnknownNode {
        /// The unknown id.
        id: NodeId,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A file could not be read.
    #[error("invalid path '{}': {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: std::path::PathBuf,
        /// Why the path could not be used.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// Failure produced while scanning path text.
///
/// Positions are zero-based character indices into the input; accessor
/// offsets are byte offsets, matching what the accessor parser receives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A reserved character appeared inside a name.
    #[error("illegal character '{character}' at position {position}")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Zero-based character position.
        position: usize,
    },

    /// A character that is legal in names appeared where the grammar forbids it.
    #[error("unexpected character '{character}' at position {position}, expected {expected}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Zero-based character position.
        position: usize,
        /// What the scanner was expecting.
        expected: &'static str,
    },

    /// The accessor parser rejected the trailing member-access text.
    #[error("invalid accessor at offset {offset}: {message}")]
    Accessor {
        /// Byte offset where the accessor text starts.
        offset: usize,
        /// Message reported by the accessor parser.
        message: String,
    },
}

impl ParseError {
    /// Returns the offending character, if the error is tied to one.
    #[must_use]
    pub fn character(&self) -> Option<char> {
        match self {
            Self::IllegalCharacter { character, .. }
            | Self::UnexpectedCharacter { character, .. } => Some(*character),
            Self::Accessor { .. } => None,
        }
    }

    /// Returns the position reported by the error.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::IllegalCharacter { position, .. }
            | Self::UnexpectedCharacter { position, .. } => *position,
            Self::Accessor { offset, .. } => *offset,
        }
    }
}

impl Error {
    /// Check if the error is a parent-chain cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodepath::Error;
    ///
    /// let err = Error::Cycle { node: "a".to_string(), node_type: "()" };
    /// assert!(err.is_cycle());
    /// ```
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle { .. })
    }

    /// Check if the error came from malformed path text.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
