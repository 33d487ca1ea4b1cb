//! Runtime error type shared by natives, dispatch and the class model.
//!
//! A `RuntimeError` is recoverable: the caller reports it through
//! [`Runtime::report`](crate::Runtime::report) and continues with `null`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("argument '{param}' (position {position}) required for {op}")]
    MissingArgument {
        op: &'static str,
        param: &'static str,
        position: usize,
    },

    #[error("{op} expects at most {max} arguments but got {actual}")]
    TooManyArguments {
        op: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("argument '{param}' of {op} must be of type {expected} (got '{actual}')")]
    ArgumentType {
        op: &'static str,
        param: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("dictionary keys must be strings (got '{0}')")]
    DictKeyType(&'static str),

    #[error("index out of bounds (size: {len}, index: {index})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("unknown member '{member}' on {ty}")]
    UnknownMember { member: String, ty: &'static str },

    #[error("cannot access private member '{member}' of class {class}")]
    PrivateMember { class: String, member: String },

    #[error("class {class} already defines a member named '{member}'")]
    DuplicateMember { class: String, member: String },

    #[error("'{0}' is not callable")]
    NotCallable(&'static str),

    #[error("'{0}' is a script function and must be called by the interpreter")]
    ScriptFunction(String),

    #[error("cannot construct {target} from {from}")]
    Construction {
        target: &'static str,
        from: &'static str,
    },

    #[error("{op}: length {requested} exceeds the limit of {limit} elements")]
    TooLarge {
        op: &'static str,
        requested: usize,
        limit: usize,
    },

    #[error("{op}: path '{path}' is not within the allowed roots")]
    PathNotAllowed { op: &'static str, path: String },

    #[error("{op}: {message}")]
    Io { op: &'static str, message: String },
}

impl RuntimeError {
    pub(crate) fn io(op: &'static str, message: impl Into<String>) -> Self {
        RuntimeError::Io {
            op,
            message: message.into(),
        }
    }
}
