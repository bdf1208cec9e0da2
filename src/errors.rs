use failure::Fail;

use crate::values::Value;

/// failures while growing list storage
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum AllocError {
    #[fail(display = "{}", _0)]
    OutOfMemory(&'static str),

    #[fail(display = "List capacity exceeded")]
    CapacityExceeded,
}

impl AllocError {
    pub fn kind(&self) -> &'static str {
        match self {
            AllocError::OutOfMemory(_) => "MemoryError",
            AllocError::CapacityExceeded => "ListError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum ParseError {
    #[fail(display = "Unexpected EOF, expected ')'")]
    UnclosedList,

    #[fail(display = "Invalid expression inside list")]
    InvalidListItem,

    #[fail(display = "Invalid number format")]
    InvalidNumber,

    #[fail(display = "Symbol too long")]
    SymbolTooLong,

    #[fail(display = "Empty symbol or unparsable token")]
    EmptySymbol,

    #[fail(display = "Expression nested too deeply")]
    TooDeep,

    #[fail(display = "{}", _0)]
    Alloc(#[cause] AllocError),
}

impl ParseError {
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::Alloc(err) => err.kind(),
            _ => "SyntaxError",
        }
    }
}

impl From<AllocError> for ParseError {
    fn from(err: AllocError) -> ParseError {
        ParseError::Alloc(err)
    }
}

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum RunError {
    #[fail(display = "{}", _0)]
    TypeError(String),

    #[fail(display = "{}", _0)]
    WrongNumArgs(String),

    #[fail(display = "Division by zero")]
    DivideByZero,

    #[fail(display = "Symbol not bound to a function")]
    Unbound,

    #[fail(display = "Expression head is not a function")]
    InapplicableHead,

    #[fail(display = "Expression nested too deeply")]
    TooDeep,

    #[fail(display = "{}", _0)]
    Alloc(#[cause] AllocError),
}

impl RunError {
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::TypeError(_) => "TypeError",
            RunError::WrongNumArgs(_) => "ArityError",
            RunError::DivideByZero => "DivisionByZeroError",
            RunError::Unbound => "UnboundError",
            RunError::InapplicableHead => "InapplicableHeadError",
            RunError::TooDeep => "EvalError",
            RunError::Alloc(err) => err.kind(),
        }
    }
}

impl From<AllocError> for RunError {
    fn from(err: AllocError) -> RunError {
        RunError::Alloc(err)
    }
}

// errors cross into the language as ordinary values

impl From<AllocError> for Value {
    fn from(err: AllocError) -> Value {
        Value::error(err.kind(), err.to_string())
    }
}

impl From<ParseError> for Value {
    fn from(err: ParseError) -> Value {
        Value::error(err.kind(), err.to_string())
    }
}

impl From<RunError> for Value {
    fn from(err: RunError) -> Value {
        Value::error(err.kind(), err.to_string())
    }
}
