use itertools::join;
use std::fmt;
use std::io::{self, Write};

use crate::builtins::Builtin;
use crate::errors::AllocError;

/// number of slots a freshly built list reserves
pub const INITIAL_CAPACITY: usize = 4;

/// text of the symbol `quit` evaluates to
pub const QUIT_SENTINEL: &str = "quitting";

/// representation of psi's data types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Symbol(String),
    List(Vec<Value>),
    Function(Builtin),
    Error { kind: String, message: String },
}

use self::Value::*;

impl Value {
    pub fn symbol<S: Into<String>>(text: S) -> Value {
        Symbol(text.into())
    }

    pub fn error<K, M>(kind: K, message: M) -> Value
        where K: Into<String>, M: Into<String>
    {
        Error {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            Error { .. } => true,
            _ => false,
        }
    }

    /// true for the value `(quit)` hands back to stop the session
    pub fn is_quit_sentinel(&self) -> bool {
        match self {
            Symbol(s) => s == QUIT_SENTINEL,
            _ => false,
        }
    }

    /// get the human-friendly type of a `Value`
    pub fn get_type(&self) -> &'static str {
        match self {
            Number(_)   => "Number",
            Bool(_)     => "Bool",
            Symbol(_)   => "Symbol",
            List(_)     => "List",
            Function(_) => "Function",
            Error { .. } => "Error",
        }
    }

    /// write a `Value` to stdout, without a trailing newline
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number(n)   => fmt_number(*n, f),
            Bool(true)  => write!(f, "#t"),
            Bool(false) => write!(f, "#f"),
            Symbol(s)   => write!(f, "{}", s),
            List(list)  => write!(f, "({})", join(list.iter(), " ")),
            Function(_) => write!(f, "<function>"),
            Error { kind, message } => write!(f, "$error{{{} {}}}", kind, message),
        }
    }
}

/// integral numbers print bare, everything else with three decimals
fn fmt_number(n: f64, f: &mut fmt::Formatter) -> fmt::Result {
    if n.is_nan() {
        write!(f, "nan")
    } else if n == 0.0 {
        write!(f, "0")
    } else if n.is_finite() && n.fract() == 0.0 {
        write!(f, "{:.0}", n)
    } else {
        write!(f, "{:.3}", n)
    }
}

/// allocate storage for a new list
pub fn new_list() -> Result<Vec<Value>, AllocError> {
    let mut items = Vec::new();
    items.try_reserve_exact(INITIAL_CAPACITY)
        .map_err(|_| AllocError::OutOfMemory("Failed to allocate list"))?;
    Ok(items)
}

/// append to a list, doubling its storage when full
pub fn push(items: &mut Vec<Value>, item: Value) -> Result<(), AllocError> {
    if items.len() == items.capacity() {
        let grown = items.capacity()
            .max(INITIAL_CAPACITY / 2)
            .checked_mul(2)
            .ok_or(AllocError::CapacityExceeded)?;

        items.try_reserve_exact(grown - items.len())
            .map_err(|_| AllocError::OutOfMemory("Failed to grow list"))?;
    }

    items.push(item);
    Ok(())
}

// }}}
