#[macro_use]
extern crate failure_derive;

pub mod builtins;
pub mod errors;
pub mod eval;
mod file;
mod log;
pub mod parser;
pub mod values;

use crate::values::Value;

/// lines must be shorter than this many bytes
pub const MAX_INPUT: usize = 1023;

/// what a line of input asks the REPL to do next
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// print this, then read the next line
    Output(String),
    /// stop the session
    Quit,
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    pub debug: bool,
    pub max_input: usize,
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter {
            debug: false,
            max_input: MAX_INPUT,
        }
    }
}

impl Interpreter {
    /// create a new Interpreter
    pub fn new() -> Interpreter {
        Interpreter::default()
    }

    /// read, evaluate and render one line of psi code
    pub fn run<S: AsRef<str>>(&self, line: S) -> Reply {
        let line = line.as_ref();
        let line = line.strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        if line.len() >= self.max_input {
            let msg = format!("Input exceeds maximum size of {} bytes", self.max_input);
            return output(Value::error("InputError", msg));
        }
        if line.is_empty() {
            return output(Value::error("SyntaxError", "Empty input"));
        }
        if !parser::balanced_parens(line) {
            return output(Value::error("SyntaxError", "Unbalanced parentheses"));
        }

        // only the first expression on a line is read
        let sexp = match parser::parse_str(line) {
            Some(sexp) => sexp,
            None => return output(Value::error("SyntaxError", "Empty input or unparsable")),
        };

        if self.debug {
            log::debug(format!("parsed {}: {:?}", sexp.get_type(), sexp));
        }

        if sexp.is_error() {
            return output(sexp);
        }
        if is_quit_form(&sexp) {
            return Reply::Quit;
        }

        let result = eval::eval(&sexp);
        if result.is_quit_sentinel() {
            Reply::Quit
        } else {
            output(result)
        }
    }
}

fn output(value: Value) -> Reply {
    Reply::Output(value.to_string())
}

/// `(quit)` stops the session before it reaches the evaluator
fn is_quit_form(sexp: &Value) -> bool {
    match sexp {
        Value::List(list) => match list.as_slice() {
            [Value::Symbol(s)] => s == "quit",
            _ => false,
        },
        _ => false,
    }
}

// }}}
