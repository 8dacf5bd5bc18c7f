use std::fmt;

use crate::interface::FlagSource;

/// A compiled condition expression.
///
/// The tree is immutable once built and owns its children exclusively; it
/// can be evaluated any number of times, from any thread, without
/// re-parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionNode {
    /// Always evaluates to false. The result of an empty expression.
    False,
    /// A flag name, answered by the lookup capability at evaluation time.
    Keyword { name: String },
    /// Logical NOT.
    Not { condition: Box<ConditionNode> },
    /// Logical AND.
    And {
        left: Box<ConditionNode>,
        right: Box<ConditionNode>,
    },
    /// Logical OR.
    Or {
        left: Box<ConditionNode>,
        right: Box<ConditionNode>,
    },
}

impl ConditionNode {
    /// Evaluates the condition against one subject's flag states.
    ///
    /// Evaluation is pure and never fails: a keyword unknown to `flags` is
    /// answered by whatever `flags` returns for it.
    pub fn evaluate<F: FlagSource + ?Sized>(&self, flags: &F) -> bool {
        match self {
            Self::False => false,
            Self::Keyword { name } => flags.is_enabled(name),
            Self::Not { condition } => !condition.evaluate(flags),
            Self::And { left, right } => left.evaluate(flags) && right.evaluate(flags),
            Self::Or { left, right } => left.evaluate(flags) || right.evaluate(flags),
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::False => f.write_str("false"),
            Self::Keyword { name } => f.write_str(name),
            Self::Not { condition } => write!(f, "!({})", condition),
            Self::And { left, right } => write!(f, "({}) && ({})", left, right),
            Self::Or { left, right } => write!(f, "({}) || ({})", left, right),
        }
    }
}
