//! Error types for serialization and tree construction.
//!
//! Every fallible operation in the crate returns one of the enums below.
//! Nothing is retried internally: sink failures, malformed instruction data,
//! and unknown output encodings surface immediately to the caller.

use thiserror::Error;

/// The error type returned when serializing a document fails.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The output sink rejected a write. Output written before the failure
    /// stays in the sink; there is no partial-output recovery.
    #[error("failed to write serialized output: {0}")]
    Io(#[from] std::io::Error),

    /// The document node has no element child to serialize.
    #[error("document has no root element")]
    NoDocumentElement,

    /// The requested output encoding label is not known to `encoding_rs`.
    #[error("unsupported output encoding: {0}")]
    UnsupportedEncoding(String),

    /// The tree nests elements deeper than the configured limit.
    #[error("maximum nesting depth exceeded ({0})")]
    DepthLimitExceeded(u32),

    /// Raw content (script text, a comment, ...) holds a character the output
    /// encoding cannot represent. Character references are not an option
    /// there, since nothing decodes them.
    #[error("{context} contains a character {encoding} cannot represent")]
    Unencodable {
        /// What kind of content held the character.
        context: &'static str,
        /// The output encoding's canonical name.
        encoding: &'static str,
    },
}

/// The error type returned by an instruction processor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    /// A `namespace` instruction whose data has no `=` between prefix and URI.
    #[error("namespace instruction data {data:?} has no '=' separator")]
    MissingSeparator {
        /// The raw instruction data.
        data: String,
    },

    /// A `namespace` instruction whose prefix is empty after trimming.
    #[error("namespace instruction data {data:?} declares an empty prefix")]
    EmptyPrefix {
        /// The raw instruction data.
        data: String,
    },
}

/// The error type returned by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The installed instruction processor rejected an instruction.
    #[error("processing instruction <?{name} ...?> failed: {source}")]
    Instruction {
        /// The instruction target name.
        name: String,
        /// The processor's error.
        #[source]
        source: InstructionError,
    },

    /// The processor returned an insertion point that cannot hold content:
    /// a node that is not an element, or one detached from the document.
    #[error("processing instruction <?{name} ...?> returned an invalid insertion point")]
    InvalidInsertionPoint {
        /// The instruction target name.
        name: String,
    },
}
