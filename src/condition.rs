use std::fmt;
use std::str::FromStr;

use crate::ast::ConditionNode;
use crate::error::{ParseError, ParseResult};
use crate::interface::FlagSource;
use crate::lexer::tokenize;
use crate::parser::parse;

/// A condition expression compiled once and evaluated many times.
///
/// A `Condition` owns the expression source and the tree parsed from it.
/// Parsing happens exactly once, at construction; every later evaluation
/// reuses the cached tree.
///
/// # Example
///
/// ```
/// use minicond::{Condition, FlagSet};
///
/// let condition = Condition::parse("_ALPHABLEND_ON or _ALPHATEST_ON").unwrap();
///
/// let mut flags = FlagSet::new();
/// flags.enable("_ALPHATEST_ON");
///
/// assert!(condition.evaluate(&flags));
/// assert!(!condition.evaluate(&FlagSet::new()));
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Condition {
    source: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    node: ConditionNode,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Only the source text is serialized; rebuild the tree from it.
        #[derive(serde::Deserialize)]
        struct ConditionHelper {
            source: String,
        }

        let helper = ConditionHelper::deserialize(deserializer)?;

        Condition::parse(helper.source)
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse condition: {}", e)))
    }
}

impl Condition {
    /// Compiles an expression.
    ///
    /// An empty (or whitespace-only) expression compiles successfully to a
    /// condition that is always false.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered while lexing or
    /// parsing the expression.
    pub fn parse<T: Into<String>>(source: T) -> Result<Self, ParseError> {
        let source = source.into();
        let node = compile(&source)?;
        Ok(Self { source, node })
    }

    /// Compiles an expression, degrading gracefully on failure.
    ///
    /// A malformed expression is reported once through the [`log`] facade
    /// and replaced by the always-false condition, so one bad expression
    /// hides its own UI element instead of breaking the surrounding UI.
    ///
    /// # Example
    ///
    /// ```
    /// use minicond::{Condition, FlagSet};
    ///
    /// let condition = Condition::parse_lenient("a $ b");
    /// assert!(!condition.evaluate(&FlagSet::from_iter(["a", "b"])));
    /// assert_eq!(condition.source(), "a $ b");
    /// ```
    pub fn parse_lenient<T: Into<String>>(source: T) -> Self {
        let source = source.into();
        let node = match compile(&source) {
            Ok(node) => node,
            Err(error) => {
                log::error!("Invalid condition expression {:?}: {}", source, error);
                ConditionNode::False
            }
        };
        Self { source, node }
    }

    /// The expression text this condition was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled tree.
    pub fn node(&self) -> &ConditionNode {
        &self.node
    }

    /// Evaluates the condition for one subject.
    pub fn evaluate<F: FlagSource + ?Sized>(&self, flags: &F) -> bool {
        self.node.evaluate(flags)
    }

    /// Evaluates the condition across a selection of subjects: true when
    /// it holds for at least one of them.
    ///
    /// This OR is selection-level, distinct from the expression's own
    /// `or` operator. An empty selection yields false.
    ///
    /// # Example
    ///
    /// ```
    /// use minicond::{Condition, FlagSet};
    ///
    /// let condition = Condition::parse("_EMISSION").unwrap();
    /// let materials = vec![
    ///     FlagSet::from_iter(["_EMISSION"]),
    ///     FlagSet::new(),
    /// ];
    ///
    /// assert!(condition.evaluate_any(&materials));
    /// ```
    pub fn evaluate_any<'s, F, I>(&self, subjects: I) -> bool
    where
        F: FlagSource + ?Sized + 's,
        I: IntoIterator<Item = &'s F>,
    {
        subjects
            .into_iter()
            .any(|flags| self.node.evaluate(flags))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn compile(source: &str) -> ParseResult<ConditionNode> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::interface::FlagSet;

    #[test]
    #[ntest::timeout(100)]
    fn test_parse_caches_the_tree() {
        let condition = Condition::parse("a and b").unwrap();
        assert_eq!(condition.source(), "a and b");
        assert_eq!(
            *condition.node(),
            ConditionNode::And {
                left: Box::new(ConditionNode::Keyword {
                    name: "a".to_string()
                }),
                right: Box::new(ConditionNode::Keyword {
                    name: "b".to_string()
                }),
            }
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_empty_expression_is_always_false() {
        let condition = Condition::parse("").unwrap();
        assert_eq!(*condition.node(), ConditionNode::False);
        assert!(!condition.evaluate(&|_: &str| true));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_parse_surfaces_lexer_failure() {
        let err = Condition::parse("a $ b").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.kind, ParseErrorKind::InvalidCharacter { character: '$' });
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_lenient_fallback_is_always_false() {
        let condition = Condition::parse_lenient("not and");
        assert_eq!(condition.source(), "not and");
        assert_eq!(*condition.node(), ConditionNode::False);
        assert!(!condition.evaluate(&|_: &str| true));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_evaluate_any_is_selection_level_or() {
        let condition = Condition::parse("a").unwrap();

        let on = FlagSet::from_iter(["a"]);
        let off = FlagSet::new();

        assert!(condition.evaluate_any([&on, &off]));
        assert!(!condition.evaluate_any([&off, &off]));
        assert!(!condition.evaluate_any(std::iter::empty::<&FlagSet>()));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_from_str() {
        let condition: Condition = "a or b".parse().unwrap();
        assert!(condition.evaluate(&FlagSet::from_iter(["b"])));

        let err = "((a".parse::<Condition>().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_display_renders_the_tree() {
        let condition = Condition::parse("not a and b").unwrap();
        assert_eq!(condition.to_string(), "(!(a)) && (b)");
    }
}
