//! Rule condition parsing and evaluation.
//!
//! Conditions take the single supported form `<signal_path> <op> <number>`
//! and compile down to a signal id, an operator and a constant: no boxed
//! closures, just a small struct evaluated against the store each tick.

use once_cell::sync::Lazy;
use regex::Regex;

use fg_core::{SignalId, SignalNamespace, SignalStore};

use crate::error::{CompileError, CompileResult};

/// Anchored pattern for the supported condition form.
pub const CONDITION_PATTERN: &str =
    r"^([A-Za-z0-9_./-]+)\s*(<=|>=|==|!=|<|>)\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)$";

static CONDITION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(CONDITION_PATTERN).expect("condition pattern must compile"));

/// Comparison operators permitted in rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            "==" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            _ => None,
        }
    }

    /// IEEE-754 comparison; `==`/`!=` are exact by design.
    pub fn evaluate(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
        }
    }
}

/// A compiled rule condition: reads one signal, compares to one constant.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    signal: SignalId,
    op: CompareOp,
    rhs: f64,
}

impl CompiledCondition {
    /// Evaluate against the current store state.
    pub fn eval(&self, store: &SignalStore) -> bool {
        self.op.evaluate(store.read_value(self.signal), self.rhs)
    }

    /// The signal this condition observes.
    pub fn signal(&self) -> SignalId {
        self.signal
    }
}

/// Compile a condition string, interning the signal path (creating it if
/// new; rules may observe signals nothing else mentions).
pub fn compile_condition(
    expr: &str,
    signal_ns: &mut SignalNamespace,
    rule_id: &str,
) -> CompileResult<CompiledCondition> {
    let bad_condition = || CompileError::BadRuleCondition {
        rule_id: rule_id.to_string(),
        condition: expr.to_string(),
    };

    let captures = CONDITION_REGEX
        .captures(expr.trim())
        .ok_or_else(bad_condition)?;

    let op = CompareOp::parse(&captures[2]).ok_or_else(bad_condition)?;
    let rhs: f64 = captures[3].parse().map_err(|_| bad_condition())?;

    Ok(CompiledCondition {
        signal: signal_ns.intern(&captures[1]),
        op,
        rhs,
    })
}
