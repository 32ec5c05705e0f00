//! Error taxonomy for the generation pipeline.
//!
//! Only two conditions are fatal during generation itself: an action method
//! with no resolvable route template, and an ambiguous implicit request body.
//! Unmapped types never error — they degrade to `any`. I/O failures can only
//! occur in the save step and are propagated after being logged.

use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A controller action has neither a class-level nor a method-level
    /// route template.
    #[error("no route template found for action `{controller}.{action}`")]
    UnresolvableRoute {
        /// Controller type name.
        controller: String,
        /// Action method name.
        action: String,
    },

    /// More than one unmarked parameter is eligible as the implicit request
    /// body.
    #[error(
        "ambiguous request body for action `{controller}.{action}`: \
         candidates are {candidates:?}; mark one parameter as the body \
         parameter explicitly"
    )]
    AmbiguousBodyParameter {
        /// Controller type name.
        controller: String,
        /// Action method name.
        action: String,
        /// Names of all eligible body parameters.
        candidates: Vec<String>,
    },

    /// An entry type named in the configuration does not exist in the
    /// type universe.
    #[error("additional entry type `{0}` not found in the type model")]
    UnknownEntryType(String),

    /// The model or options file could not be parsed.
    #[error("failed to parse {what}: {source}")]
    Parse {
        /// What was being parsed ("type model", "generator options").
        what: &'static str,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Directory creation or file writing failed during the save step.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
