use super::cast::{cast, normalise, parse_input};
use super::operators::{binary_operation, Operand};
use super::{Evaluator, Flow};
use crate::environment::{RoutineContext, ScopeKind};
use crate::error::{RuntimeErrorKind, RuntimeResult};
use itertools::Itertools;
use log::debug;
use zoop_ast::expr::{
    Expr, ExprCall, ExprDeclare, ExprInput, ExprKind, ExprReassign, ExprUnary, UnaryOp, Variable,
};
use zoop_ast::literal::{Literal, Value};
use zoop_tokens::spanned::{Position, Positioned};

impl<'p> Evaluator<'p, '_> {
    pub(crate) fn evaluate(&mut self, expr: &'p Expr) -> RuntimeResult<Literal> {
        let position = expr.position();
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal.clone()),
            ExprKind::Variable(variable) => self
                .env
                .get_value(variable)
                .cloned()
                .map_err(|kind| kind.at(position)),
            ExprKind::Declare(declare) => self.declare(position, declare),
            ExprKind::Reassign(reassign) => self.reassign(position, reassign),
            ExprKind::Grouping(inner) => self.evaluate(inner),
            ExprKind::Unary(unary) => self.unary(position, unary),
            ExprKind::Binary(binary) => {
                let left = self.evaluate(&binary.left)?;
                let right = self.evaluate(&binary.right)?;
                binary_operation(
                    binary.op,
                    Operand::new(&left, binary.left.position()),
                    Operand::new(&right, binary.right.position()),
                    binary.op_position,
                )
            }
            ExprKind::Cast(cast_expr) => {
                let literal = self.evaluate(&cast_expr.expr)?;
                cast(literal, cast_expr.ty).map_err(|kind| kind.at(position))
            }
            ExprKind::Input(input) => self.input(position, input),
            ExprKind::Call(call) => self.call(position, call),
        }
    }

    /// Declarations take the value as is, its type must already match
    fn declare(&mut self, position: Position, declare: &'p ExprDeclare) -> RuntimeResult<Literal> {
        let literal = self.evaluate(&declare.value)?;
        if literal.ty() != declare.ty {
            return Err(RuntimeErrorKind::AssignType {
                value: literal.ty(),
                variable: declare.variable.clone(),
                ty: declare.ty,
            }
            .at(declare.value.position()));
        }
        self.env
            .define_variable(&declare.variable, literal.clone())
            .map_err(|kind| kind.at(position))?;
        Ok(literal)
    }

    /// Reassignments may move between numeric types, the value is cast to the variable's type
    fn reassign(
        &mut self,
        position: Position,
        reassign: &'p ExprReassign,
    ) -> RuntimeResult<Literal> {
        let variable = Variable::new(true, reassign.name.as_str());
        let ty = self
            .env
            .get_value(&variable)
            .map_err(|kind| kind.at(position))?
            .ty();

        let mut literal = self.evaluate(&reassign.value)?;
        if literal.ty() != ty {
            if !(literal.ty().is_numeric() && ty.is_numeric()) {
                return Err(RuntimeErrorKind::AssignType {
                    value: literal.ty(),
                    variable,
                    ty,
                }
                .at(reassign.value.position()));
            }
            literal = cast(literal, ty).map_err(|kind| kind.at(position))?;
        }

        self.env
            .assign_variable(&reassign.name, literal.clone())
            .map_err(|kind| kind.at(position))?;
        Ok(literal)
    }

    fn unary(&mut self, position: Position, unary: &'p ExprUnary) -> RuntimeResult<Literal> {
        let operand = self.evaluate(&unary.operand)?;
        match (unary.op, operand.value()) {
            (UnaryOp::Not, Value::Boolean(b)) => Ok(Literal::bool(!*b)),
            (UnaryOp::Not, _) => Err(RuntimeErrorKind::NotOperand.at(position)),
            (UnaryOp::Negate, Value::Number(n)) => {
                let ty = operand.ty();
                Ok(Literal::new(ty, normalise(ty, -*n)))
            }
            (UnaryOp::Negate, _) => Err(RuntimeErrorKind::NegateOperand.at(position)),
        }
    }

    /// Prompts for a line and checks it against the requested type
    fn input(&mut self, position: Position, input: &'p ExprInput) -> RuntimeResult<Literal> {
        let prompt = match &input.prompt {
            Some(label) => format!("<-| {label} "),
            None => "<-| ".to_string(),
        };
        let line = self
            .console
            .read_line(&prompt)
            .map_err(|e| RuntimeErrorKind::from(e).at(position))?
            .ok_or_else(|| RuntimeErrorKind::InputCancelled.at(position))?;
        parse_input(&line, input.ty).map_err(|kind| kind.at(position))
    }

    /// Calls a zoop. Arguments are evaluated in the caller's scope, the body runs in a scope
    /// nested directly in the global one.
    fn call(&mut self, position: Position, call: &'p ExprCall) -> RuntimeResult<Literal> {
        let routine = self
            .env
            .get_routine(&call.label)
            .map_err(|kind| kind.at(position))?;
        if routine.arity() != call.args.len() {
            return Err(RuntimeErrorKind::ArgumentCount {
                expected: routine.arity(),
                got: call.args.len(),
            }
            .at(position));
        }

        let mut context = RoutineContext::with_capacity(routine.arity());
        for (param, arg) in routine.params().iter().zip(&call.args) {
            let literal = self.evaluate(arg)?;
            if literal.ty() != param.ty {
                return Err(RuntimeErrorKind::ArgumentType {
                    expected: param.ty,
                    got: literal.ty(),
                }
                .at(arg.position()));
            }
            context.insert(param.name.clone(), literal);
        }

        debug!(
            "calling `{}` with ({})",
            routine.label(),
            context
                .iter()
                .map(|(name, literal)| format!("${name} = {literal}"))
                .join(", ")
        );
        self.env
            .push_context(context)
            .map_err(|kind| kind.at(position))?;
        let flow = self.in_scope(ScopeKind::RoutineBody, |this| {
            this.execute_all(routine.body())
        });
        self.env.pop_context();

        match flow? {
            Flow::Continue | Flow::Return => Ok(Literal::void()),
            Flow::End => unreachable!("end statement escaped its loop"),
            Flow::Value(literal) if literal.ty() == routine.return_type() => Ok(literal),
            Flow::Value(literal) => Err(RuntimeErrorKind::ReturnType {
                expected: routine.return_type(),
                got: literal.ty(),
            }
            .at(position)),
        }
    }
}
