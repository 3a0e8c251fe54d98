use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, Span};
use crate::value::Value;

/// Walks an expression tree and computes its value.
///
/// The evaluator holds no state between expressions; the span it carries is
/// only used to position runtime diagnostics.
pub struct Evaluator {
    span: Span,
}

impl Evaluator {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// An evaluator whose errors cover the whole of `source`.
    pub fn for_source(source: &str) -> Self {
        Self::new(Span::new(0, source.chars().count()))
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, CalcError> {
        match expr {
            Expr::Literal(value) => Ok(Value::Int(*value)),
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                self.evaluate_binary_op(*operator, left_val, right_val)
            }
        }
    }

    fn evaluate_binary_op(
        &self,
        operator: BinaryOp,
        left: Value,
        right: Value,
    ) -> Result<Value, CalcError> {
        match operator {
            BinaryOp::Add => match (left, right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_add(r)
                    .map(Value::Int)
                    .ok_or_else(|| self.overflow(operator, l, r)),
                (l, r) => self.finite(operator, l.as_f64() + r.as_f64()),
            },
            BinaryOp::Subtract => match (left, right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_sub(r)
                    .map(Value::Int)
                    .ok_or_else(|| self.overflow(operator, l, r)),
                (l, r) => self.finite(operator, l.as_f64() - r.as_f64()),
            },
            BinaryOp::Multiply => match (left, right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_mul(r)
                    .map(Value::Int)
                    .ok_or_else(|| self.overflow(operator, l, r)),
                (l, r) => self.finite(operator, l.as_f64() * r.as_f64()),
            },
            BinaryOp::Divide => {
                if right.is_zero() {
                    return Err(CalcError::division_by_zero(self.span));
                }
                // Division never truncates
                self.finite(operator, left.as_f64() / right.as_f64())
            }
        }
    }

    /// Rejects `inf` and `NaN` so they never reach a later operation.
    fn finite(&self, operator: BinaryOp, result: f64) -> Result<Value, CalcError> {
        if result.is_finite() {
            Ok(Value::Double(result))
        } else {
            Err(CalcError::numeric_overflow(
                self.span,
                format!("the result of '{}' is too large to represent", operator),
            ))
        }
    }

    fn overflow(&self, operator: BinaryOp, left: i64, right: i64) -> CalcError {
        CalcError::integer_overflow(
            self.span,
            format!("{} {} {} does not fit in a 64-bit integer", left, operator, right),
        )
    }
}

/// Evaluates `expr` with diagnostics pointing at the start of the input.
pub fn evaluate(expr: &Expr) -> Result<Value, CalcError> {
    Evaluator::new(Span::new(0, 0)).evaluate_expression(expr)
}
