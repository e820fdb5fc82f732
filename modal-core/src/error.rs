use thiserror::Error;

/// Every fatal condition the interpreter can hit. There is no recoverable
/// error path: anything here aborts the run that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("usage: modal <file.modal>")]
    UsageError,

    #[error("could not open `{path}`: {reason}")]
    IoOpenFailed { path: String, reason: String },

    #[error("could not write output: {reason}")]
    IoWriteFailed { reason: String },

    #[error("out of space for interned string bytes")]
    OutOfStringBytes,

    #[error("out of space for a new symbol")]
    OutOfSymbolSpace,

    #[error("arena is full")]
    ArenaFull,

    #[error("expected a space after `<>`")]
    ExpectedSpaceAfterDefine,

    #[error("unmatched `)`")]
    UnmatchedCloseParen,

    #[error("`<>` without two following subtrees")]
    TruncatedRule,

    #[error("out of space for a new rule")]
    TooManyRules,

    #[error("invalid symbol {0}")]
    InvalidSymbol(u32),

    #[error("atom exceeds the maximum length of {0} bytes")]
    AtomTooLong(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
