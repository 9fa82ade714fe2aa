//! Construction errors
//!
//! Errors are only produced while lowering an AST or building a flow
//! graph. Querying a constructed graph is infallible.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed AST: invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed AST: unknown node kind `{0}`")]
    UnknownNodeKind(String),

    #[error("malformed AST: `{kind}` is missing required field `{field}`")]
    MissingField { kind: String, field: &'static str },

    #[error("malformed AST: {0}")]
    Malformed(String),

    #[error("unresolved jump: `break` outside of loop or switch")]
    BreakOutsideLoop,

    #[error("unresolved jump: `continue` outside of loop")]
    ContinueOutsideLoop,

    #[error("unresolved jump: no enclosing statement labeled `{0}`")]
    UnknownLabel(String),

    #[error("unresolved jump: `return` outside of function")]
    ReturnOutsideFunction,
}

impl Error {
    /// True for the MalformedAST error class.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::Json(_) | Error::UnknownNodeKind(_) | Error::MissingField { .. } | Error::Malformed(_)
        )
    }

    /// True for the UnresolvedJump error class.
    pub fn is_unresolved_jump(&self) -> bool {
        !self.is_malformed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = Error::UnknownNodeKind("ClassDeclaration".into());
        assert_eq!(err.to_string(), "malformed AST: unknown node kind `ClassDeclaration`");
        assert!(err.is_malformed());

        let err = Error::UnknownLabel("outer".into());
        assert_eq!(err.to_string(), "unresolved jump: no enclosing statement labeled `outer`");
        assert!(err.is_unresolved_jump());
    }
}
