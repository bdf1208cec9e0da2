use std::fmt;
use std::mem;

use crate::errors::RunError;
use crate::values::Value::{self, *};
use crate::values::QUIT_SENTINEL;

type BuiltinFn = fn(&[Value]) -> Result<Value, RunError>;

/// table order decides which entry a symbol resolves to
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("+",    add),
    ("-",    sub),
    ("*",    mul),
    ("/",    div),
    ("=",    eq),
    ("quit", quit),
];

/// a handle to one entry of `BUILTINS`
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    func: BuiltinFn,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// run the builtin; failures come back as error values
    pub fn call(&self, args: &[Value]) -> Value {
        match (self.func)(args) {
            Ok(value) => value,
            Err(err) => err.into(),
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Builtin) -> bool {
        self.name == other.name
    }
}

/// find the builtin bound to a symbol
pub fn lookup(symbol: &str) -> Option<Builtin> {
    BUILTINS.iter()
        .find(|(name, _)| *name == symbol)
        .map(|&(name, func)| Builtin { name, func })
}

// {{{ helpful macros
/// extract the f64 from a `Number`, or fail with a TypeError carrying $msg
macro_rules! number {
    ($value: expr, $msg: expr) => {{
        if let Number(n) = $value {
            Ok(*n)
        } else {
            Err(RunError::TypeError($msg.to_string()))
        }
    }}
}

/// return an Err(RunError::WrongNumArgs) unless $args holds $num values
macro_rules! check_num_args {
    ($args: ident, $num: expr, $msg: expr) => {{
        if $args.len() != $num {
            Err(RunError::WrongNumArgs($msg.to_string()))
        } else {
            Ok(())
        }
    }}
}
// }}}

// {{{ math
/// usage: (+ <num> ...)
pub fn add(args: &[Value]) -> Result<Value, RunError> {
    let mut sum = 0.0;
    for arg in args {
        sum += number!(arg, "Arguments to + must be numbers")?;
    }
    Ok(Number(sum))
}

/// usage: (- <num>)
///        (- <num> <num>)
pub fn sub(args: &[Value]) -> Result<Value, RunError> {
    if args.is_empty() {
        return Err(RunError::WrongNumArgs("'-' requires at least one argument".to_string()));
    }

    let first = number!(&args[0], "First argument to - must be a number")?;
    match args.len() {
        1 => Ok(Number(-first)),
        2 => {
            let second = number!(&args[1], "Second argument to - must be a number")?;
            Ok(Number(first - second))
        }
        _ => Err(RunError::WrongNumArgs("'-' currently supports 1 or 2 arguments".to_string())),
    }
}

/// usage: (* <num> ...)
pub fn mul(args: &[Value]) -> Result<Value, RunError> {
    let mut product = 1.0;
    for arg in args {
        product *= number!(arg, "Arguments to * must be numbers")?;
    }
    Ok(Number(product))
}

/// usage: (/ <num> <num>)
pub fn div(args: &[Value]) -> Result<Value, RunError> {
    check_num_args!(args, 2, "'/' requires exactly 2 arguments")?;

    let dividend = number!(&args[0], "Arguments to / must be numbers")?;
    let divisor = number!(&args[1], "Arguments to / must be numbers")?;
    if divisor == 0.0 {
        return Err(RunError::DivideByZero);
    }

    Ok(Number(dividend / divisor))
}
// }}}

// {{{ logic
/// numbers closer than this compare equal
const EPSILON: f64 = 1e-10;

/// usage: (= <expr> <expr>)
pub fn eq(args: &[Value]) -> Result<Value, RunError> {
    check_num_args!(args, 2, "'=' requires exactly 2 arguments")?;

    let (a, b) = (&args[0], &args[1]);
    if mem::discriminant(a) != mem::discriminant(b) {
        return Ok(Bool(false));
    }

    match (a, b) {
        (Number(a), Number(b)) => Ok(Bool((a - b).abs() < EPSILON)),
        (Bool(a), Bool(b))     => Ok(Bool(a == b)),
        (Symbol(a), Symbol(b)) => Ok(Bool(a == b)),
        _ => Err(RunError::TypeError("Unsupported types for equality comparison".to_string())),
    }
}
// }}}

/// ask the session to stop
/// usage: (quit)
pub fn quit(args: &[Value]) -> Result<Value, RunError> {
    check_num_args!(args, 0, "quit takes no arguments")?;
    Ok(Value::symbol(QUIT_SENTINEL))
}

// }}}
