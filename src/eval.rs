use crate::builtins;
use crate::errors::{AllocError, RunError};
use crate::values::{self, Value::{self, *}};

/// deepest nesting `eval` will walk into
pub const MAX_DEPTH: usize = 512;

/// evaluate a structured s-expression. the input is left untouched and the
/// result is always a fresh value.
pub fn eval(s_exp: &Value) -> Value {
    eval_at(s_exp, 0)
}

fn eval_at(s_exp: &Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return RunError::TooDeep.into();
    }

    match s_exp {
        Symbol(sym) => resolve_symbol(sym),

        List(list) => {
            if list.is_empty() {
                match values::new_list() {
                    Ok(empty) => List(empty),
                    Err(err) => err.into(),
                }
            } else {
                run_proc(list, depth)
            }
        }

        // numbers, bools, errors and functions evaluate to themselves
        _ => s_exp.clone(),
    }
}

/// resolve a symbol to the builtin it names
fn resolve_symbol(symbol: &str) -> Value {
    match builtins::lookup(symbol) {
        Some(builtin) => Function(builtin),
        None => RunError::Unbound.into(),
    }
}

/// apply the head of a list to the rest of it
fn run_proc(list: &[Value], depth: usize) -> Value {
    let args = match eval_list(list, depth) {
        Ok(args) => args,
        Err(err) => return err,
    };

    match &args[0] {
        Function(builtin) => builtin.call(&args[1..]),
        _ => RunError::InapplicableHead.into(),
    }
}

/// evaluate every Value in a slice, stopping at the first error
fn eval_list(list: &[Value], depth: usize) -> Result<Vec<Value>, Value> {
    let mut evaluated = Vec::new();
    evaluated.try_reserve_exact(list.len())
        .map_err(|_| Value::from(AllocError::OutOfMemory("Failed to allocate evaluated items")))?;

    for item in list {
        let value = eval_at(item, depth + 1);
        if value.is_error() {
            return Err(value);
        }
        evaluated.push(value);
    }

    Ok(evaluated)
}

// }}}
