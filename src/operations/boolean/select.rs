use serde::{Deserialize, Serialize};

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    /// Everything covered by any operand.
    Union,
    /// The first operand minus all following operands.
    Subtract,
    /// The area common to all operands.
    Intersect,
    /// The area covered by an odd number of operands.
    Exclude,
}

impl BooleanOp {
    /// Returns the stable identifier used in signatures.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Subtract => "subtract",
            Self::Intersect => "intersect",
            Self::Exclude => "exclude",
        }
    }

    /// Returns a human-readable layer name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Union => "Union",
            Self::Subtract => "Subtract",
            Self::Intersect => "Intersect",
            Self::Exclude => "Exclude",
        }
    }

    /// Fill rule the result is meant to be rendered with.
    #[must_use]
    pub fn fill_rule(self) -> FillRule {
        match self {
            Self::Exclude => FillRule::EvenOdd,
            Self::Union | Self::Subtract | Self::Intersect => FillRule::NonZero,
        }
    }
}

/// Rule deciding which regions of overlapping rings are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillRule {
    #[serde(rename = "nonzero")]
    NonZero,
    #[serde(rename = "evenodd")]
    EvenOdd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_uses_even_odd() {
        assert_eq!(BooleanOp::Exclude.fill_rule(), FillRule::EvenOdd);
        assert_eq!(BooleanOp::Union.fill_rule(), FillRule::NonZero);
        assert_eq!(BooleanOp::Subtract.fill_rule(), FillRule::NonZero);
        assert_eq!(BooleanOp::Intersect.fill_rule(), FillRule::NonZero);
    }

    #[test]
    fn op_identifiers() {
        assert_eq!(BooleanOp::Subtract.as_str(), "subtract");
        assert_eq!(BooleanOp::Exclude.label(), "Exclude");
    }
}
