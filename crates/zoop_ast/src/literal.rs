//! Runtime values and the literals that carry them

use crate::types::DataType;
use std::fmt::{Display, Formatter};
use zoop_tokens::token::{Token, TokenKind, TokenValue};

/// The raw value inside a [Literal]
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Void,
}

impl Value {
    /// Whether a guard holding this value passes
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Boolean(b) => *b,
            Value::Void => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),
            Value::String(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Void => write!(f, "<void>"),
        }
    }
}

/// Writes the shortest digits that read back as `n`. Magnitudes from 1e21 up and below 1e-6 use
/// exponent form, as in `1e+21` and `1.5e-7`.
fn fmt_number(n: f64, f: &mut Formatter<'_>) -> std::fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    // negative zero prints as plain zero
    if n == 0.0 {
        return write!(f, "0");
    }
    if n.is_sign_negative() {
        write!(f, "-")?;
    }
    let n = n.abs();
    if n.is_infinite() {
        return write!(f, "Infinity");
    }

    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return write!(f, "{n}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return write!(f, "{n}");
    };
    let digits = mantissa.replace('.', "");
    let len = digits.len() as i32;
    // where the decimal point falls, counted in digits from the left
    let point = exponent + 1;

    if len <= point && point <= 21 {
        write!(f, "{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        write!(f, "{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        write!(f, "0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            write!(f, "{first}e{sign}{}", exponent.abs())
        } else {
            write!(f, "{first}.{rest}e{sign}{}", exponent.abs())
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A typed value
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    ty: DataType,
    value: Value,
}

impl Literal {
    /// Creates a new literal. The value is taken as is; callers are responsible for it fitting
    /// the type.
    pub fn new(ty: DataType, value: impl Into<Value>) -> Self {
        Self {
            ty,
            value: value.into(),
        }
    }

    /// The value of a zoop that produced nothing
    pub fn void() -> Self {
        Self {
            ty: DataType::Void,
            value: Value::Void,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(DataType::String, Value::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(DataType::Bool, value)
    }

    pub fn label(value: impl Into<String>) -> Self {
        Self::new(DataType::Label, Value::String(value.into()))
    }

    /// Creates a literal from a `LITERAL` token, classifying numbers by their lexeme.
    ///
    /// A `.` makes a number a `dec`, a trailing `u` makes it unsigned.
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind() != TokenKind::Literal {
            return None;
        }
        match token.value()? {
            TokenValue::Number(n) => {
                let lexeme = token.lexeme();
                let ty = match (lexeme.contains('.'), lexeme.ends_with('u')) {
                    (false, false) => DataType::Int,
                    (false, true) => DataType::Uint,
                    (true, false) => DataType::Dec,
                    (true, true) => DataType::Udec,
                };
                Some(Self::new(ty, *n))
            }
            TokenValue::String(s) if token.is_label() => Some(Self::label(s.as_str())),
            TokenValue::String(s) => Some(Self::string(s.as_str())),
            TokenValue::Boolean(b) => Some(Self::bool(*b)),
        }
    }

    pub fn ty(&self) -> DataType {
        self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_void(&self) -> bool {
        self.ty == DataType::Void
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
