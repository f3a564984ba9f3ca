//! Conversions between data types

use crate::error::RuntimeErrorKind;
use zoop_ast::literal::{Literal, Value};
use zoop_ast::types::DataType;

/// Fits a number to a numeric type. Whole types drop the fraction, unsigned types stop at zero.
pub fn normalise(ty: DataType, n: f64) -> f64 {
    let n = if ty.is_integral() { n.trunc() } else { n };
    if ty.is_unsigned() {
        n.max(0.0)
    } else {
        n
    }
}

/// Casts `literal` to `target`. Casting to the literal's own type changes nothing.
pub fn cast(literal: Literal, target: DataType) -> Result<Literal, RuntimeErrorKind> {
    if literal.ty() == target {
        return Ok(literal);
    }
    let invalid = || RuntimeErrorKind::InvalidCast {
        from: literal.ty(),
        to: target,
    };
    if literal.is_void() {
        return Err(invalid());
    }

    let cast = match target {
        DataType::Int | DataType::Uint | DataType::Dec | DataType::Udec => {
            let n = match literal.value() {
                Value::Number(n) => *n,
                Value::Boolean(b) => f64::from(u8::from(*b)),
                _ => return Err(invalid()),
            };
            Literal::new(target, normalise(target, n))
        }
        DataType::String => Literal::string(literal.value().to_string()),
        DataType::Bool => Literal::bool(literal.value().is_truthy()),
        DataType::Label => match literal.value() {
            Value::String(s) => Literal::label(s.as_str()),
            _ => return Err(invalid()),
        },
        DataType::Void => return Err(invalid()),
    };
    Ok(cast)
}

/// Reads a line typed by the user as a value of type `ty`
pub fn parse_input(input: &str, ty: DataType) -> Result<Literal, RuntimeErrorKind> {
    let invalid = || RuntimeErrorKind::InvalidInput {
        ty,
        input: input.to_string(),
    };
    match ty {
        DataType::String => Ok(Literal::string(input)),
        DataType::Label => Ok(Literal::label(input)),
        DataType::Bool => match input {
            "true" => Ok(Literal::bool(true)),
            "false" => Ok(Literal::bool(false)),
            _ => Err(invalid()),
        },
        DataType::Int | DataType::Uint | DataType::Dec | DataType::Udec => {
            let n = input
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| invalid())?;
            if ty.is_integral() && n.fract() != 0.0 {
                return Err(invalid());
            }
            if ty.is_unsigned() && n < 0.0 {
                return Err(invalid());
            }
            Ok(Literal::new(ty, n))
        }
        DataType::Void => Err(invalid()),
    }
}
