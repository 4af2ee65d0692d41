//! Error types for the planner library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Stage of an orchestrated command at which an error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStage {
    /// Turning the message into a tool invocation
    Interpretation,
    /// Running the selected tool
    ToolExecution,
    /// Running the chained feedback tool
    FeedbackGeneration,
}

impl fmt::Display for CommandStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandStage::Interpretation => "interpretation",
            CommandStage::ToolExecution => "tool execution",
            CommandStage::FeedbackGeneration => "feedback generation",
        })
    }
}

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: String },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: String },
    /// The user owns no plans to operate on
    #[error("No plans found for user '{user_id}'")]
    NoPlans { user_id: String },
    /// Goal matching could not settle on one of the user's goals
    #[error("No goal matches the message (generator answered '{answer}')")]
    NoMatch { answer: String },
    /// A reschedule message carried no "<n> days" delay
    #[error("No delay in days found in message '{message}'")]
    NoDelayFound { message: String },
    /// The text generator or another collaborator failed or timed out
    #[error("{service} failed: {message}")]
    Collaborator { service: String, message: String },
    /// A collaborator returned text that could not be parsed
    #[error("Failed to parse {what}: {reason}")]
    Parse { what: String, reason: String },
    /// A wire-level intent did not have the expected shape
    #[error("Invalid intent: {reason}")]
    Classification { reason: String },
    /// A tool name was unknown or its parameters were missing or mistyped
    #[error("Cannot dispatch tool '{tool}': {reason}")]
    Dispatch { tool: String, reason: String },
    /// An orchestrated command failed at the given stage
    #[error("{stage} failed: {source}")]
    Command {
        stage: CommandStage,
        #[source]
        source: Box<PlannerError>,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a collaborator failure attributed to `service`.
    pub fn collaborator(service: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Collaborator {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Creates a dispatch error for `tool`.
    pub fn dispatch(tool: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Dispatch {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }

    /// Wraps the error with the orchestrator stage it came from.
    pub fn at_stage(self, stage: CommandStage) -> Self {
        Self::Command {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through stage annotations.
    pub fn root(&self) -> &PlannerError {
        match self {
            PlannerError::Command { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the error was caused by caller input rather than by the
    /// system or a collaborator.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.root(),
            PlannerError::InvalidInput { .. }
                | PlannerError::Classification { .. }
                | PlannerError::Dispatch { .. }
                | PlannerError::NoDelayFound { .. }
        )
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to PlannerError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| PlannerError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
