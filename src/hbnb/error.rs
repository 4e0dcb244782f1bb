use thiserror::Error;

/// Argument-validation failures surfaced to the console user.
///
/// Each variant renders as one fixed line. They never terminate the
/// console: the command aborts and the prompt comes back.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("** invalid method **")]
    InvalidMethod,

    #[error("** class doesn't exist **")]
    UnknownClass,

    #[error("** class name missing **")]
    MissingClassName,

    #[error("** instance id missing **")]
    MissingId,

    #[error("** no instance found **")]
    InstanceNotFound,

    #[error("** attribute name missing **")]
    MissingAttributeName,

    #[error("** value missing **")]
    MissingValue,
}

impl CommandError {
    /// Stable short key for the message, e.g. `no_cls`.
    pub fn key(&self) -> &'static str {
        match self {
            CommandError::InvalidMethod => "no_method",
            CommandError::UnknownClass => "no_cls",
            CommandError::MissingClassName => "no_cls_name",
            CommandError::MissingId => "no_obj_id",
            CommandError::InstanceNotFound => "no_obj",
            CommandError::MissingAttributeName => "no_attr_name",
            CommandError::MissingValue => "no_attr_val",
        }
    }
}

#[derive(Error, Debug)]
pub enum HbnbError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

pub type Result<T> = std::result::Result<T, HbnbError>;
