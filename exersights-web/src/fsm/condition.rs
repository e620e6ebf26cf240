//! Transition conditions
//!
//! Conditions are small typed expression trees over joint angles, joint
//! positions and the exercise's targets. Operands that cannot be resolved
//! for the selected side make their comparison false.

use super::definition::Targets;
use super::joints::JointView;

/// Numeric operand
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Angle(String),
    X(String),
    Y(String),
    Target(String),
    Const(f32),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
}

pub fn angle(name: &str) -> Expr {
    Expr::Angle(name.to_string())
}

/// Horizontal coordinate of a named position
pub fn x(name: &str) -> Expr {
    Expr::X(name.to_string())
}

/// Vertical coordinate of a named position, smaller is higher on screen
pub fn y(name: &str) -> Expr {
    Expr::Y(name.to_string())
}

pub fn target(name: &str) -> Expr {
    Expr::Target(name.to_string())
}

pub fn constant(value: f32) -> Expr {
    Expr::Const(value)
}

impl From<f32> for Expr {
    fn from(value: f32) -> Self {
        Expr::Const(value)
    }
}

/// Comparison operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn apply(self, lhs: f32, rhs: f32) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }
}

/// Named thing an expression reads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference<'a> {
    Angle(&'a str),
    Position(&'a str),
    Target(&'a str),
}

impl Expr {
    pub fn plus(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs.into()))
    }

    pub fn minus(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs.into()))
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::Compare(self, CompareOp::Lt, rhs.into())
    }

    pub fn le(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::Compare(self, CompareOp::Le, rhs.into())
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::Compare(self, CompareOp::Gt, rhs.into())
    }

    pub fn ge(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::Compare(self, CompareOp::Ge, rhs.into())
    }

    pub fn eval(&self, joints: &JointView<'_>, targets: &Targets) -> Option<f32> {
        match self {
            Expr::Angle(name) => joints.angle(name),
            Expr::X(name) => joints.position(name).map(|p| p.x),
            Expr::Y(name) => joints.position(name).map(|p| p.y),
            Expr::Target(name) => targets.get(name),
            Expr::Const(value) => Some(*value),
            Expr::Add(lhs, rhs) => Some(lhs.eval(joints, targets)? + rhs.eval(joints, targets)?),
            Expr::Sub(lhs, rhs) => Some(lhs.eval(joints, targets)? - rhs.eval(joints, targets)?),
        }
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<Reference<'a>>) {
        match self {
            Expr::Angle(name) => out.push(Reference::Angle(name)),
            Expr::X(name) | Expr::Y(name) => out.push(Reference::Position(name)),
            Expr::Target(name) => out.push(Reference::Target(name)),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) => {
                lhs.collect_references(out);
                rhs.collect_references(out);
            }
        }
    }
}

/// Boolean expression over [`Expr`] operands
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Compare(Expr, CompareOp, Expr),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    Not(Box<Predicate>),
    Always,
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::All(mut parts) => {
                parts.push(other);
                Predicate::All(parts)
            }
            first => Predicate::All(vec![first, other]),
        }
    }

    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Any(mut parts) => {
                parts.push(other);
                Predicate::Any(parts)
            }
            first => Predicate::Any(vec![first, other]),
        }
    }

    pub fn negate(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    pub fn holds(&self, joints: &JointView<'_>, targets: &Targets) -> bool {
        match self {
            Predicate::Compare(lhs, op, rhs) => {
                match (lhs.eval(joints, targets), rhs.eval(joints, targets)) {
                    (Some(l), Some(r)) => op.apply(l, r),
                    _ => false,
                }
            }
            Predicate::All(parts) => parts.iter().all(|p| p.holds(joints, targets)),
            Predicate::Any(parts) => parts.iter().any(|p| p.holds(joints, targets)),
            Predicate::Not(inner) => !inner.holds(joints, targets),
            Predicate::Always => true,
        }
    }

    /// Every name the predicate reads
    pub fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<Reference<'a>>) {
        match self {
            Predicate::Compare(lhs, _, rhs) => {
                lhs.collect_references(out);
                rhs.collect_references(out);
            }
            Predicate::All(parts) | Predicate::Any(parts) => {
                for part in parts {
                    part.collect_references(out);
                }
            }
            Predicate::Not(inner) => inner.collect_references(out),
            Predicate::Always => {}
        }
    }
}

/// States a condition is considered in
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Applicability {
    #[default]
    Any,
    /// Only these states; an empty list never applies
    States(Vec<String>),
}

impl Applicability {
    pub fn includes(&self, state: &str) -> bool {
        match self {
            Applicability::Any => true,
            Applicability::States(states) => states.iter().any(|s| s == state),
        }
    }
}

/// Named predicate that can trigger a transition
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub name: String,
    pub applies: Applicability,
    pub predicate: Predicate,
}

impl Condition {
    pub fn new(name: &str, predicate: Predicate) -> Self {
        Self {
            name: name.to_string(),
            applies: Applicability::Any,
            predicate,
        }
    }

    /// Restrict the condition to the given states
    pub fn in_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applies = Applicability::States(states.into_iter().map(Into::into).collect());
        self
    }
}

/// Name of the first declared condition that applies to `state` and holds
pub fn first_satisfied<'a>(
    conditions: &'a [Condition],
    state: &str,
    joints: &JointView<'_>,
    targets: &Targets,
) -> Option<&'a str> {
    conditions
        .iter()
        .filter(|condition| condition.applies.includes(state))
        .find(|condition| condition.predicate.holds(joints, targets))
        .map(|condition| condition.name.as_str())
}
