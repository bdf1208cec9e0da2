use crate::errors::ParseError;
use crate::values::{self, Value::{self, *}};

/// longest symbol the reader accepts, in characters
pub const MAX_SYMBOL_LEN: usize = 255;

/// deepest list nesting the reader accepts
pub const MAX_DEPTH: usize = 256;

/// a read position in a line of input
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Cursor<'a> {
        Cursor { input, pos: 0 }
    }

    /// byte offset into the input
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// the input not consumed yet
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, is_space) {
            self.bump();
        }
    }
}

/// the C locale's `isspace` set
fn is_space(c: char) -> bool {
    match c {
        ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' => true,
        _ => false,
    }
}

fn is_delimiter(c: char) -> bool {
    is_space(c) || c == '(' || c == ')'
}

/// read the next expression, advancing the cursor past it. `None` means the
/// input held nothing but whitespace; malformed input gives a SyntaxError value.
pub fn parse(cursor: &mut Cursor) -> Option<Value> {
    match parse_expr(cursor, 0) {
        Ok(Some(value)) => Some(value),
        Ok(None) => None,
        Err(err) => Some(err.into()),
    }
}

/// read the first expression of a string
pub fn parse_str(input: &str) -> Option<Value> {
    parse(&mut Cursor::new(input))
}

fn parse_expr(cursor: &mut Cursor, depth: usize) -> Result<Option<Value>, ParseError> {
    cursor.skip_whitespace();

    let c = match cursor.peek() {
        Some(c) => c,
        None => return Ok(None),
    };

    let rest = cursor.rest();
    let value = if c == '(' {
        cursor.bump();
        parse_list(cursor, depth + 1)?
    } else if starts_number(rest) {
        parse_number(cursor)?
    } else if rest.starts_with("#t") {
        cursor.advance(2);
        Bool(true)
    } else if rest.starts_with("#f") {
        cursor.advance(2);
        Bool(false)
    } else {
        parse_symbol(cursor)?
    };

    Ok(Some(value))
}

fn parse_list(cursor: &mut Cursor, depth: usize) -> Result<Value, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep);
    }

    let mut list = values::new_list()?;
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(ParseError::UnclosedList),
            Some(')') => {
                cursor.bump();
                return Ok(List(list));
            }
            Some(_) => {
                let item = parse_expr(cursor, depth)?.ok_or(ParseError::InvalidListItem)?;
                values::push(&mut list, item)?;
            }
        }
    }
}

fn starts_number(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() || c == '.' => true,
        Some('-') => chars.next().map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    }
}

fn parse_number(cursor: &mut Cursor) -> Result<Value, ParseError> {
    let (n, len) = scan_float(cursor.rest()).ok_or(ParseError::InvalidNumber)?;
    cursor.advance(len);
    Ok(Number(n))
}

fn parse_symbol(cursor: &mut Cursor) -> Result<Value, ParseError> {
    let mut symbol = String::new();
    let mut len = 0;

    while let Some(c) = cursor.peek() {
        if is_delimiter(c) {
            break;
        }
        if len >= MAX_SYMBOL_LEN {
            return Err(ParseError::SymbolTooLong);
        }
        symbol.push(c);
        len += 1;
        cursor.bump();
    }

    if symbol.is_empty() {
        Err(ParseError::EmptySymbol)
    } else {
        Ok(Symbol(symbol))
    }
}

fn count_while<F: Fn(u8) -> bool>(bytes: &[u8], pred: F) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// scan the longest floating point literal at the start of `s`, the way
/// `strtod` does. returns the value and the number of bytes it spans.
pub fn scan_float(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => { i += 1; true }
        Some(b'+') => { i += 1; false }
        _ => false,
    };

    let hex = bytes.len() > i + 1
        && bytes[i] == b'0'
        && (bytes[i + 1] == b'x' || bytes[i + 1] == b'X');

    let (magnitude, len) = if hex {
        match scan_hex(&bytes[i + 2..]) {
            Some((n, len)) => (n, i + 2 + len),
            // "0x" with no hex digits reads as the "0" alone
            None => (0.0, i + 1),
        }
    } else {
        let (n, len) = scan_decimal(&bytes[i..])?;
        (n, i + len)
    };

    Some((if negative { -magnitude } else { magnitude }, len))
}

fn scan_decimal(bytes: &[u8]) -> Option<(f64, usize)> {
    let int_len = count_while(bytes, |b| b.is_ascii_digit());
    let mut i = int_len;

    let mut frac_len = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_len = count_while(&bytes[i + 1..], |b| b.is_ascii_digit());
        if int_len > 0 || frac_len > 0 {
            i += 1 + frac_len;
        }
    }

    if int_len == 0 && frac_len == 0 {
        return None;
    }
    let mantissa_end = i;

    let mut exponent = None;
    if let Some(b'e') | Some(b'E') = bytes.get(i) {
        let mut j = i + 1;
        if let Some(b'+') | Some(b'-') = bytes.get(j) {
            j += 1;
        }
        let exp_len = count_while(&bytes[j.min(bytes.len())..], |b| b.is_ascii_digit());
        if exp_len > 0 {
            exponent = Some(&bytes[i + 1..j + exp_len]);
            i = j + exp_len;
        }
    }

    // rebuild a form `str::parse` always takes: <int>.<frac>e<exp>
    let mut text = String::with_capacity(i + 4);
    let int_part = &bytes[..int_len];
    let frac_part = if frac_len > 0 {
        &bytes[mantissa_end - frac_len..mantissa_end]
    } else {
        &[][..]
    };
    text.push_str(if int_part.is_empty() { "0" } else { ascii(int_part) });
    text.push('.');
    text.push_str(if frac_part.is_empty() { "0" } else { ascii(frac_part) });
    if let Some(exp) = exponent {
        text.push('e');
        text.push_str(ascii(exp));
    }

    text.parse::<f64>().ok().map(|n| (n, i))
}

fn ascii(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or("0")
}

fn scan_hex(bytes: &[u8]) -> Option<(f64, usize)> {
    let hex_value = |b: u8| (b as char).to_digit(16).map(f64::from);

    let mut value = 0.0;
    let mut i = 0;
    let mut digits = 0;
    while let Some(d) = bytes.get(i).and_then(|&b| hex_value(b)) {
        value = value * 16.0 + d;
        i += 1;
        digits += 1;
    }

    if bytes.get(i) == Some(&b'.') {
        let mut scale = 1.0 / 16.0;
        let mut j = i + 1;
        let mut frac_digits = 0;
        while let Some(d) = bytes.get(j).and_then(|&b| hex_value(b)) {
            value += d * scale;
            scale /= 16.0;
            j += 1;
            frac_digits += 1;
        }
        if digits > 0 || frac_digits > 0 {
            i = j;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    if let Some(b'p') | Some(b'P') = bytes.get(i) {
        let mut j = i + 1;
        let negative = match bytes.get(j) {
            Some(b'-') => { j += 1; true }
            Some(b'+') => { j += 1; false }
            _ => false,
        };
        let exp_len = count_while(&bytes[j.min(bytes.len())..], |b| b.is_ascii_digit());
        if exp_len > 0 {
            let exp: i32 = ascii(&bytes[j..j + exp_len]).parse().unwrap_or(i32::max_value());
            value = scale_by_pow2(value, if negative { -exp } else { exp });
            i = j + exp_len;
        }
    }

    Some((value, i))
}

/// `value * 2^exp`, applied in steps so no intermediate factor overflows
/// to inf or underflows to zero before the final product is taken
fn scale_by_pow2(mut value: f64, mut exp: i32) -> f64 {
    const STEP: i32 = 1000;

    if value == 0.0 {
        return value;
    }
    while exp > STEP && value.is_finite() {
        value *= 2f64.powi(STEP);
        exp -= STEP;
    }
    while exp < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP);
        exp += STEP;
    }
    value * 2f64.powi(exp)
}

/// check that every `)` closes an earlier `(` and none are left open
pub fn balanced_parens(input: &str) -> bool {
    let mut open: usize = 0;
    for c in input.chars() {
        match c {
            '(' => open += 1,
            ')' => {
                if open == 0 {
                    return false;
                }
                open -= 1;
            }
            _ => {}
        }
    }
    open == 0
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &str) -> Value {
        parse_str(input).expect("expected an expression")
    }

    fn syntax_error(message: &str) -> Value {
        Value::error("SyntaxError", message)
    }

    #[test]
    fn nested_lists() {
        assert_eq!(
            parse_one("(+ 1 (* 2 3))"),
            List(vec![
                Value::symbol("+"),
                Number(1.0),
                List(vec![Value::symbol("*"), Number(2.0), Number(3.0)]),
            ])
        );
        assert_eq!(parse_one("  ( )"), List(vec![]));
        assert_eq!(parse_one("((()))"), List(vec![List(vec![List(vec![])])]));
    }

    #[test]
    fn end_of_input() {
        assert_eq!(parse_str(""), None);
        assert_eq!(parse_str(" \t\r\n\x0B\x0C"), None);
    }

    #[test]
    fn cursor_stops_after_expression() {
        let mut cursor = Cursor::new("(a b) 12 #f");
        assert_eq!(parse(&mut cursor), Some(List(vec![Value::symbol("a"), Value::symbol("b")])));
        assert_eq!(cursor.rest(), " 12 #f");
        assert_eq!(parse(&mut cursor), Some(Number(12.0)));
        assert_eq!(parse(&mut cursor), Some(Bool(false)));
        assert!(cursor.is_empty());
        assert_eq!(parse(&mut cursor), None);
    }

    #[test]
    fn unclosed_list() {
        assert_eq!(parse_one("(+ 1 2"), syntax_error("Unexpected EOF, expected ')'"));
        assert_eq!(parse_one("(+ (1"), syntax_error("Unexpected EOF, expected ')'"));
    }

    #[test]
    fn errors_inside_lists_propagate() {
        assert_eq!(parse_one("(1 ( . ) 2)"), syntax_error("Invalid number format"));
        let long = format!("(+ {})", "x".repeat(300));
        assert_eq!(parse_one(&long), syntax_error("Symbol too long"));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_one("42"), Number(42.0));
        assert_eq!(parse_one("-7"), Number(-7.0));
        assert_eq!(parse_one("4.5"), Number(4.5));
        assert_eq!(parse_one(".5"), Number(0.5));
        assert_eq!(parse_one("5."), Number(5.0));
        assert_eq!(parse_one("1e3"), Number(1000.0));
        assert_eq!(parse_one("2.5E-1"), Number(0.25));
        assert_eq!(parse_one("0x1A"), Number(26.0));
        assert_eq!(parse_one("0x1p4"), Number(16.0));
        assert_eq!(parse_one("."), syntax_error("Invalid number format"));
    }

    #[test]
    fn number_scan_stops_like_strtod() {
        assert_eq!(scan_float("12abc"), Some((12.0, 2)));
        assert_eq!(scan_float("1e"), Some((1.0, 1)));
        assert_eq!(scan_float("1e+"), Some((1.0, 1)));
        assert_eq!(scan_float("3.25)"), Some((3.25, 4)));
        assert_eq!(scan_float("0x"), Some((0.0, 1)));
        assert_eq!(scan_float("-0x10"), Some((-16.0, 5)));
        assert_eq!(scan_float(".e5"), None);

        let mut cursor = Cursor::new("5abc");
        assert_eq!(parse(&mut cursor), Some(Number(5.0)));
        assert_eq!(parse(&mut cursor), Some(Value::symbol("abc")));
    }

    #[test]
    fn hex_exponent_extremes() {
        assert_eq!(scan_float("0x0p9999"), Some((0.0, 8)));
        assert_eq!(scan_float("0x1p-1074"), Some((5e-324, 9)));
        assert_eq!(scan_float("0x1p1024"), Some((std::f64::INFINITY, 8)));
        assert_eq!(scan_float("0x1p1023"), Some((2f64.powi(1023), 8)));
        assert_eq!(scan_float("0x1p-1080"), Some((0.0, 9)));
        assert_eq!(scan_float("0x1p99999999999"), Some((std::f64::INFINITY, 15)));
        assert_eq!(parse_one("(0x0p9999)"), List(vec![Number(0.0)]));
    }

    #[test]
    fn minus_is_a_symbol_unless_a_digit_follows() {
        assert_eq!(parse_one("-"), Value::symbol("-"));
        assert_eq!(parse_one("-x"), Value::symbol("-x"));
        assert_eq!(parse_one("-.5"), Value::symbol("-.5"));
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_one("#t"), Bool(true));
        assert_eq!(parse_one("#f"), Bool(false));

        let mut cursor = Cursor::new("#true");
        assert_eq!(parse(&mut cursor), Some(Bool(true)));
        assert_eq!(cursor.rest(), "rue");
        assert_eq!(parse_one("#x"), Value::symbol("#x"));
    }

    #[test]
    fn symbol_length_boundary() {
        let ok = "s".repeat(MAX_SYMBOL_LEN);
        assert_eq!(parse_one(&ok), Value::symbol(ok.clone()));

        let too_long = "s".repeat(MAX_SYMBOL_LEN + 1);
        assert_eq!(parse_one(&too_long), syntax_error("Symbol too long"));
    }

    #[test]
    fn stray_close_paren() {
        assert_eq!(parse_one(")"), syntax_error("Empty symbol or unparsable token"));
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(!parse_one(&deep).is_error());

        let deeper = format!("{}{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(parse_one(&deeper), syntax_error("Expression nested too deeply"));
    }

    #[test]
    fn printed_form_reparses() {
        for input in &["(+ 1 (* 2 3))", "(#t #f sym (-4 0.25))", "()", "foo"] {
            let value = parse_one(input);
            assert_eq!(parse_one(&value.to_string()), value);
        }
    }

    #[test]
    fn paren_balance() {
        assert!(balanced_parens("(+ 1 (* 2 3))"));
        assert!(balanced_parens("no parens"));
        assert!(!balanced_parens("(+ 1"));
        assert!(!balanced_parens(")("));
        assert!(!balanced_parens("(a))"));
    }
}
// }}}
