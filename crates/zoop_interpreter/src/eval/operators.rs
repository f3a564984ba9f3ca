//! Binary operators

use super::cast::normalise;
use crate::error::{RuntimeErrorKind, RuntimeResult};
use zoop_ast::expr::BinaryOp;
use zoop_ast::literal::{Literal, Value};
use zoop_ast::types::DataType;
use zoop_tokens::spanned::Position;

/// An evaluated operand and where its expression starts
#[derive(Debug, Copy, Clone)]
pub struct Operand<'a> {
    pub literal: &'a Literal,
    pub position: Position,
}

impl<'a> Operand<'a> {
    pub fn new(literal: &'a Literal, position: Position) -> Self {
        Self { literal, position }
    }

    fn ty(&self) -> DataType {
        self.literal.ty()
    }

    fn value(&self) -> &'a Value {
        self.literal.value()
    }
}

/// Applies `op` to two evaluated operands
pub fn binary_operation(
    op: BinaryOp,
    left: Operand,
    right: Operand,
    op_position: Position,
) -> RuntimeResult<Literal> {
    match op {
        BinaryOp::Concat => concat(left, right),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            math(op, left, right, op_position)
        }
        BinaryOp::And | BinaryOp::Or => logic(op, left, right),
        BinaryOp::Eq | BinaryOp::NotEq => equality(op, left, right, op_position),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            comparison(op, left, right)
        }
    }
}

/// Both operands as numbers, or the first operand that is not one
fn numbers(op: BinaryOp, left: Operand, right: Operand) -> RuntimeResult<(f64, f64)> {
    match (left.value().as_number(), right.value().as_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        (None, _) => Err(RuntimeErrorKind::NumericOperands { op, got: left.ty() }.at(left.position)),
        (_, None) => {
            Err(RuntimeErrorKind::NumericOperands { op, got: right.ty() }.at(right.position))
        }
    }
}

fn math(
    op: BinaryOp,
    left: Operand,
    right: Operand,
    op_position: Position,
) -> RuntimeResult<Literal> {
    let (l, r) = numbers(op, left, right)?;
    if left.ty() != right.ty() {
        return Err(RuntimeErrorKind::MixedOperation {
            op,
            left: left.ty(),
            right: right.ty(),
        }
        .at(op_position));
    }
    let (ty, result) = match op {
        BinaryOp::Add => (left.ty(), l + r),
        BinaryOp::Sub => (left.ty(), l - r),
        BinaryOp::Mul => (left.ty(), l * r),
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(RuntimeErrorKind::DivisionByZero.at(right.position));
            }
            (DataType::Dec, l / r)
        }
        other => unreachable!("{other} is not a math operator"),
    };
    Ok(Literal::new(ty, normalise(ty, result)))
}

fn logic(op: BinaryOp, left: Operand, right: Operand) -> RuntimeResult<Literal> {
    let (l, r) = match (left.value().as_bool(), right.value().as_bool()) {
        (Some(l), Some(r)) => (l, r),
        (None, _) => {
            return Err(RuntimeErrorKind::LogicOperands { op, got: left.ty() }.at(left.position))
        }
        (_, None) => {
            return Err(RuntimeErrorKind::LogicOperands { op, got: right.ty() }.at(right.position))
        }
    };
    // both sides are always evaluated, there is no short circuit
    let result = match op {
        BinaryOp::And => l && r,
        _ => l || r,
    };
    Ok(Literal::bool(result))
}

fn equality(
    op: BinaryOp,
    left: Operand,
    right: Operand,
    op_position: Position,
) -> RuntimeResult<Literal> {
    if left.ty() != right.ty() {
        return Err(RuntimeErrorKind::EqualityTypes {
            left: left.ty(),
            right: right.ty(),
        }
        .at(op_position));
    }
    let equal = left.value() == right.value();
    Ok(Literal::bool(if op == BinaryOp::Eq { equal } else { !equal }))
}

fn comparison(op: BinaryOp, left: Operand, right: Operand) -> RuntimeResult<Literal> {
    let (l, r) = numbers(op, left, right)?;
    let result = match op {
        BinaryOp::Lt => l < r,
        BinaryOp::LtEq => l <= r,
        BinaryOp::Gt => l > r,
        _ => l >= r,
    };
    Ok(Literal::bool(result))
}

fn concat(left: Operand, right: Operand) -> RuntimeResult<Literal> {
    for operand in [left, right] {
        if operand.literal.is_void() {
            return Err(RuntimeErrorKind::ConcatVoid.at(operand.position));
        }
    }
    Ok(Literal::string(format!("{}{}", left.literal, right.literal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn at(col: usize) -> Position {
        Position::new(1, col)
    }

    fn apply(op: BinaryOp, left: &Literal, right: &Literal) -> RuntimeResult<Literal> {
        binary_operation(op, Operand::new(left, at(0)), Operand::new(right, at(4)), at(2))
    }

    fn int(n: f64) -> Literal {
        Literal::new(DataType::Int, n)
    }

    fn uint(n: f64) -> Literal {
        Literal::new(DataType::Uint, n)
    }

    #[test]
    fn test_math_keeps_operand_type() {
        assert_eq!(apply(BinaryOp::Add, &int(5.0), &int(3.0)).unwrap(), int(8.0));
        assert_eq!(apply(BinaryOp::Mul, &int(-2.0), &int(3.0)).unwrap(), int(-6.0));
        // unsigned results never go below zero
        assert_eq!(apply(BinaryOp::Sub, &uint(2.0), &uint(5.0)).unwrap(), uint(0.0));
    }

    #[test]
    fn test_division_is_always_dec() {
        let result = apply(BinaryOp::Div, &int(7.0), &int(2.0)).unwrap();
        assert_eq!(result, Literal::new(DataType::Dec, 3.5));
    }

    #[test]
    fn test_division_by_zero() {
        for zero in [int(0.0), Literal::new(DataType::Int, -0.0)] {
            let err = apply(BinaryOp::Div, &int(1.0), &zero).unwrap_err();
            assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);
            assert_eq!(err.position, at(4));
        }
    }

    #[test]
    fn test_mixed_numeric_types() {
        let err = apply(BinaryOp::Add, &int(1.0), &Literal::new(DataType::Dec, 1.0)).unwrap_err();
        assert_eq!(err.position, at(2));
        assert!(matches!(err.kind, RuntimeErrorKind::MixedOperation { .. }));

        let err = apply(BinaryOp::Add, &int(1.0), &Literal::string("a")).unwrap_err();
        assert_eq!(
            err.kind,
            RuntimeErrorKind::NumericOperands {
                op: BinaryOp::Add,
                got: DataType::String
            }
        );
        assert_eq!(err.position, at(4));
    }

    #[test]
    fn test_logic() {
        let t = Literal::bool(true);
        let f = Literal::bool(false);
        assert_eq!(apply(BinaryOp::And, &t, &f).unwrap(), f);
        assert_eq!(apply(BinaryOp::Or, &t, &f).unwrap(), t);
        let err = apply(BinaryOp::Or, &int(1.0), &t).unwrap_err();
        assert_eq!(err.kind.to_string(), "Operands of '|' must be of type <bool>, got <int> instead");
        assert_eq!(err.position, at(0));
    }

    #[test]
    fn test_equality_requires_same_type() {
        assert_eq!(
            apply(BinaryOp::Eq, &Literal::string("a"), &Literal::string("a")).unwrap(),
            Literal::bool(true)
        );
        assert_eq!(
            apply(BinaryOp::NotEq, &int(1.0), &int(2.0)).unwrap(),
            Literal::bool(true)
        );
        let err = apply(BinaryOp::Eq, &int(1.0), &uint(1.0)).unwrap_err();
        assert_eq!(err.kind.to_string(), "Cannot compare equality of <int> with <uint>");
    }

    #[test]
    fn test_comparison_accepts_any_numbers() {
        assert_eq!(
            apply(BinaryOp::Lt, &int(1.0), &Literal::new(DataType::Udec, 1.5)).unwrap(),
            Literal::bool(true)
        );
        assert_eq!(
            apply(BinaryOp::GtEq, &int(2.0), &int(2.0)).unwrap(),
            Literal::bool(true)
        );
        assert!(apply(BinaryOp::Gt, &Literal::bool(true), &int(1.0)).is_err());
    }

    #[test]
    fn test_concat() {
        assert_eq!(
            apply(BinaryOp::Concat, &Literal::string("n = "), &int(4.0)).unwrap(),
            Literal::string("n = 4")
        );
        assert_eq!(
            apply(BinaryOp::Concat, &Literal::bool(true), &Literal::new(DataType::Dec, 0.5))
                .unwrap(),
            Literal::string("true0.5")
        );
        let err = apply(BinaryOp::Concat, &Literal::string("a"), &Literal::void()).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::ConcatVoid);
        assert_eq!(err.position, at(4));
    }
}
