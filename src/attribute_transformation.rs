use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::transformation_kind::TransformationKind;

static NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z_-]*)\s*(?:\((.*)\))?\s*$").expect("notation pattern is valid")
});

/// Spelling of a missing alignment in the notation
pub const ABSENT_ALIGNMENT: &str = "none";

/// Whether an attribute value survives a display/parse round trip inside a
/// `from->to` argument: non-empty, no surrounding whitespace, no `->`, no control
/// characters.
pub fn is_notation_safe(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && !value.contains("->")
        && !value.chars().any(char::is_control)
}

/// Like [`is_notation_safe`], and not mistakable for a missing alignment
pub fn is_alignment_notation_safe(value: &str) -> bool {
    is_notation_safe(value) && !value.eq_ignore_ascii_case(ABSENT_ALIGNMENT)
}

/// Payload comparison used once both sides are known to share a kind
pub trait StructuralEq {
    fn structurally_equal(&self, other: &Self) -> bool;
}

/// Axis a figure is mirrored about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

impl FromStr for Axis {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "h" => Ok(Axis::Horizontal),
            "vertical" | "v" => Ok(Axis::Vertical),
            other => Err(NotationError::InvalidArgument("Reflection", other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub axis: Axis,
}

impl StructuralEq for Reflection {
    fn structurally_equal(&self, other: &Self) -> bool {
        self.axis == other.axis
    }
}

/// Counter-clockwise rotation in whole degrees. Compared exactly, no modulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub degrees: i32,
}

impl StructuralEq for Rotation {
    fn structurally_equal(&self, other: &Self) -> bool {
        self.degrees == other.degrees
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillChange {
    pub from: String,
    pub to: String,
}

impl StructuralEq for FillChange {
    fn structurally_equal(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

/// Size ratio target / source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub factor: f64,
}

impl StructuralEq for Scale {
    fn structurally_equal(&self, other: &Self) -> bool {
        self.factor == other.factor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentChange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl StructuralEq for AlignmentChange {
    fn structurally_equal(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeChange {
    pub from: String,
    pub to: String,
}

impl StructuralEq for ShapeChange {
    fn structurally_equal(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

/// A single detected change between two figures, one variant per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeTransformation {
    NoChange,
    Reflection(Reflection),
    Rotation(Rotation),
    FillChange(FillChange),
    Scale(Scale),
    AlignmentChange(AlignmentChange),
    ShapeChange(ShapeChange),
    Creation,
    Deletion,
}

impl AttributeTransformation {
    pub fn reflection(axis: Axis) -> Self {
        AttributeTransformation::Reflection(Reflection { axis })
    }

    pub fn rotation(degrees: i32) -> Self {
        AttributeTransformation::Rotation(Rotation { degrees })
    }

    pub fn fill_change(from: impl Into<String>, to: impl Into<String>) -> Self {
        AttributeTransformation::FillChange(FillChange {
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn scale(factor: f64) -> Self {
        AttributeTransformation::Scale(Scale { factor })
    }

    pub fn alignment_change(from: Option<String>, to: Option<String>) -> Self {
        AttributeTransformation::AlignmentChange(AlignmentChange { from, to })
    }

    pub fn shape_change(from: impl Into<String>, to: impl Into<String>) -> Self {
        AttributeTransformation::ShapeChange(ShapeChange {
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn kind(&self) -> TransformationKind {
        match self {
            AttributeTransformation::NoChange => TransformationKind::NoChange,
            AttributeTransformation::Reflection(_) => TransformationKind::Reflection,
            AttributeTransformation::Rotation(_) => TransformationKind::Rotation,
            AttributeTransformation::FillChange(_) => TransformationKind::FillChange,
            AttributeTransformation::Scale(_) => TransformationKind::Scale,
            AttributeTransformation::AlignmentChange(_) => TransformationKind::AlignmentChange,
            AttributeTransformation::ShapeChange(_) => TransformationKind::ShapeChange,
            AttributeTransformation::Creation => TransformationKind::Creation,
            AttributeTransformation::Deletion => TransformationKind::Deletion,
        }
    }

    pub fn base_weight(&self) -> u32 {
        self.kind().base_weight()
    }

    /// Same kind, then equal payload under that kind's own rule
    pub fn structurally_equal(&self, other: &AttributeTransformation) -> bool {
        self.kind() == other.kind() && self.payload_structurally_equal(other)
    }

    fn payload_structurally_equal(&self, other: &AttributeTransformation) -> bool {
        use AttributeTransformation as T;

        match (self, other) {
            (T::NoChange, T::NoChange) | (T::Creation, T::Creation) | (T::Deletion, T::Deletion) => true,
            (T::Reflection(a), T::Reflection(b)) => a.structurally_equal(b),
            (T::Rotation(a), T::Rotation(b)) => a.structurally_equal(b),
            (T::FillChange(a), T::FillChange(b)) => a.structurally_equal(b),
            (T::Scale(a), T::Scale(b)) => a.structurally_equal(b),
            (T::AlignmentChange(a), T::AlignmentChange(b)) => a.structurally_equal(b),
            (T::ShapeChange(a), T::ShapeChange(b)) => a.structurally_equal(b),
            _ => false,
        }
    }
}

fn alignment_label(alignment: &Option<String>) -> &str {
    alignment.as_deref().unwrap_or(ABSENT_ALIGNMENT)
}

impl fmt::Display for AttributeTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            AttributeTransformation::NoChange
            | AttributeTransformation::Creation
            | AttributeTransformation::Deletion => write!(f, "{}", kind),
            AttributeTransformation::Reflection(r) => write!(f, "{}({})", kind, r.axis.name()),
            AttributeTransformation::Rotation(r) => write!(f, "{}({})", kind, r.degrees),
            AttributeTransformation::FillChange(c) => write!(f, "{}({}->{})", kind, c.from, c.to),
            AttributeTransformation::Scale(s) => write!(f, "{}({})", kind, s.factor),
            AttributeTransformation::AlignmentChange(c) => write!(
                f,
                "{}({}->{})",
                kind,
                alignment_label(&c.from),
                alignment_label(&c.to)
            ),
            AttributeTransformation::ShapeChange(c) => write!(f, "{}({}->{})", kind, c.from, c.to),
        }
    }
}

impl FromStr for AttributeTransformation {
    type Err = NotationError;

    /// Parses the notation produced by `Display`, e.g. `Rotation(90)` or `FillChange(no->yes)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = NOTATION
            .captures(s)
            .ok_or_else(|| NotationError::Malformed(s.to_string()))?;

        let kind: TransformationKind = captures[1]
            .parse()
            .map_err(|_| NotationError::UnknownKind(captures[1].to_string()))?;
        let argument = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|a| !a.is_empty());

        if !kind.has_payload() {
            if let Some(extra) = argument {
                return Err(NotationError::UnexpectedArgument(kind.name(), extra.to_string()));
            }
        }

        match kind {
            TransformationKind::NoChange => Ok(AttributeTransformation::NoChange),
            TransformationKind::Creation => Ok(AttributeTransformation::Creation),
            TransformationKind::Deletion => Ok(AttributeTransformation::Deletion),
            TransformationKind::Reflection => {
                let axis = require_argument(kind, argument)?.parse()?;
                Ok(AttributeTransformation::reflection(axis))
            }
            TransformationKind::Rotation => {
                let raw = require_argument(kind, argument)?;
                let degrees = raw
                    .parse()
                    .map_err(|_| NotationError::InvalidArgument(kind.name(), raw.to_string()))?;
                Ok(AttributeTransformation::rotation(degrees))
            }
            TransformationKind::Scale => {
                let raw = require_argument(kind, argument)?;
                let factor: f64 = raw
                    .parse()
                    .map_err(|_| NotationError::InvalidArgument(kind.name(), raw.to_string()))?;
                Ok(AttributeTransformation::scale(factor))
            }
            TransformationKind::FillChange => {
                let (from, to) = split_change(kind, require_argument(kind, argument)?)?;
                Ok(AttributeTransformation::fill_change(from, to))
            }
            TransformationKind::ShapeChange => {
                let (from, to) = split_change(kind, require_argument(kind, argument)?)?;
                Ok(AttributeTransformation::shape_change(from, to))
            }
            TransformationKind::AlignmentChange => {
                let (from, to) = split_change(kind, require_argument(kind, argument)?)?;
                let optional = |side: &str| {
                    if side.eq_ignore_ascii_case(ABSENT_ALIGNMENT) {
                        None
                    } else {
                        Some(side.to_string())
                    }
                };
                Ok(AttributeTransformation::alignment_change(optional(from), optional(to)))
            }
        }
    }
}

fn require_argument(kind: TransformationKind, argument: Option<&str>) -> Result<&str, NotationError> {
    argument.ok_or(NotationError::MissingArgument(kind.name()))
}

fn split_change(kind: TransformationKind, argument: &str) -> Result<(&str, &str), NotationError> {
    let (from, to) = argument
        .split_once("->")
        .ok_or_else(|| NotationError::InvalidArgument(kind.name(), argument.to_string()))?;
    let (from, to) = (from.trim(), to.trim());

    if from.is_empty() || to.is_empty() {
        return Err(NotationError::InvalidArgument(kind.name(), argument.to_string()));
    }

    Ok((from, to))
}

#[derive(Debug, Error)]
pub enum NotationError {
    #[error("Malformed transformation notation: {0}")]
    Malformed(String),

    #[error("Unknown transformation kind: {0}")]
    UnknownKind(String),

    #[error("{0} requires an argument")]
    MissingArgument(&'static str),

    #[error("{0} takes no argument, got '{1}'")]
    UnexpectedArgument(&'static str, String),

    #[error("Invalid argument for {0}: {1}")]
    InvalidArgument(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn samples() -> Vec<AttributeTransformation> {
        vec![
            AttributeTransformation::NoChange,
            AttributeTransformation::reflection(Axis::Vertical),
            AttributeTransformation::rotation(90),
            AttributeTransformation::fill_change("no", "yes"),
            AttributeTransformation::scale(2.0),
            AttributeTransformation::alignment_change(Some("top-left".to_string()), None),
            AttributeTransformation::shape_change("circle", "square"),
            AttributeTransformation::Creation,
            AttributeTransformation::Deletion,
        ]
    }

    #[test]
    fn test_kind_of_each_variant() {
        let kinds: Vec<TransformationKind> = samples().iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, TransformationKind::ALL.to_vec());
    }

    #[test]
    fn test_different_kinds_never_equal() {
        let samples = samples();
        for (i, a) in samples.iter().enumerate() {
            for (j, b) in samples.iter().enumerate() {
                if i != j {
                    assert!(!a.structurally_equal(b), "{} vs {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_payload_free_kinds_are_equal() {
        assert!(AttributeTransformation::NoChange.structurally_equal(&AttributeTransformation::NoChange));
        assert!(AttributeTransformation::Creation.structurally_equal(&AttributeTransformation::Creation));
        assert!(AttributeTransformation::Deletion.structurally_equal(&AttributeTransformation::Deletion));
    }

    #[test]
    fn test_rotation_equality() {
        let quarter = AttributeTransformation::rotation(90);
        assert!(quarter.structurally_equal(&AttributeTransformation::rotation(90)));
        assert!(!quarter.structurally_equal(&AttributeTransformation::rotation(180)));
        // exact comparison, 450 is not folded onto 90
        assert!(!quarter.structurally_equal(&AttributeTransformation::rotation(450)));
    }

    #[test]
    fn test_kind_mismatch_short_circuits() {
        let rotation = AttributeTransformation::rotation(90);
        let scale = AttributeTransformation::scale(2.0);
        assert!(!rotation.structurally_equal(&scale));
        assert!(!scale.structurally_equal(&rotation));
    }

    #[test]
    fn test_payload_comparisons() {
        assert!(AttributeTransformation::reflection(Axis::Vertical)
            .structurally_equal(&AttributeTransformation::reflection(Axis::Vertical)));
        assert!(!AttributeTransformation::reflection(Axis::Vertical)
            .structurally_equal(&AttributeTransformation::reflection(Axis::Horizontal)));
        assert!(!AttributeTransformation::fill_change("no", "yes")
            .structurally_equal(&AttributeTransformation::fill_change("yes", "no")));
        assert!(AttributeTransformation::scale(0.5).structurally_equal(&AttributeTransformation::scale(0.5)));
        assert!(!AttributeTransformation::scale(0.5).structurally_equal(&AttributeTransformation::scale(0.51)));
        assert!(!AttributeTransformation::alignment_change(None, Some("top".to_string()))
            .structurally_equal(&AttributeTransformation::alignment_change(None, None)));
    }

    #[test]
    fn test_structural_equality_is_symmetric() {
        let mut values = samples();
        values.push(AttributeTransformation::rotation(180));
        values.push(AttributeTransformation::scale(f64::NAN));
        values.push(AttributeTransformation::shape_change("square", "circle"));

        for a in &values {
            for b in &values {
                assert_eq!(a.structurally_equal(b), b.structurally_equal(a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_base_weight_follows_kind() {
        assert_eq!(AttributeTransformation::NoChange.base_weight(), 7);
        assert_eq!(AttributeTransformation::rotation(45).base_weight(), 5);
        assert_eq!(AttributeTransformation::Deletion.base_weight(), 0);
    }

    #[test]
    fn test_display_notation() {
        assert_eq!(AttributeTransformation::NoChange.to_string(), "NoChange");
        assert_eq!(AttributeTransformation::rotation(90).to_string(), "Rotation(90)");
        assert_eq!(AttributeTransformation::scale(2.0).to_string(), "Scale(2)");
        assert_eq!(
            AttributeTransformation::reflection(Axis::Horizontal).to_string(),
            "Reflection(horizontal)"
        );
        assert_eq!(
            AttributeTransformation::alignment_change(Some("top-left".to_string()), None).to_string(),
            "AlignmentChange(top-left->none)"
        );
    }

    #[test]
    fn test_parse_display_agreement() {
        for transformation in samples() {
            let text = transformation.to_string();
            let parsed: AttributeTransformation = text.parse().unwrap();
            assert!(parsed.structurally_equal(&transformation), "{}", text);
        }
    }

    #[test]
    fn test_notation_safe_values() {
        assert!(is_notation_safe("left-half"));
        assert!(is_notation_safe("none"));
        assert!(!is_notation_safe(""));
        assert!(!is_notation_safe(" yes"));
        assert!(!is_notation_safe("a->b"));
        assert!(!is_notation_safe("two\nlines"));

        assert!(is_alignment_notation_safe("top-left"));
        assert!(!is_alignment_notation_safe("none"));
        assert!(!is_alignment_notation_safe("NONE"));
    }

    #[test]
    fn test_unsafe_values_do_not_round_trip() {
        // the reason validation rejects these before detection
        let reserved = AttributeTransformation::alignment_change(Some("none".to_string()), None);
        let parsed: AttributeTransformation = reserved.to_string().parse().unwrap();
        assert!(!parsed.structurally_equal(&reserved));

        let empty_fill = AttributeTransformation::fill_change("", "yes");
        assert!(empty_fill.to_string().parse::<AttributeTransformation>().is_err());
    }

    #[test]
    fn test_parse_lenient_forms() {
        let parsed: AttributeTransformation = "rotation( 270 )".parse().unwrap();
        assert_eq!(parsed, AttributeTransformation::rotation(270));

        let parsed: AttributeTransformation = "fill_change(no -> left-half)".parse().unwrap();
        assert_eq!(parsed, AttributeTransformation::fill_change("no", "left-half"));

        let parsed: AttributeTransformation = "no-change()".parse().unwrap();
        assert_eq!(parsed, AttributeTransformation::NoChange);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "Rotation".parse::<AttributeTransformation>(),
            Err(NotationError::MissingArgument("Rotation"))
        ));
        assert!(matches!(
            "Rotation(quarter)".parse::<AttributeTransformation>(),
            Err(NotationError::InvalidArgument("Rotation", _))
        ));
        assert!(matches!(
            "Creation(1)".parse::<AttributeTransformation>(),
            Err(NotationError::UnexpectedArgument("Creation", _))
        ));
        assert!(matches!(
            "Translate(3)".parse::<AttributeTransformation>(),
            Err(NotationError::UnknownKind(_))
        ));
        assert!(matches!(
            "ShapeChange(circle)".parse::<AttributeTransformation>(),
            Err(NotationError::InvalidArgument("ShapeChange", _))
        ));
        assert!(matches!(
            "(90)".parse::<AttributeTransformation>(),
            Err(NotationError::Malformed(_))
        ));
        assert!(matches!(
            "Reflection(diagonal)".parse::<AttributeTransformation>(),
            Err(NotationError::InvalidArgument("Reflection", _))
        ));
    }

    fn value_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z-]{0,8}"
    }

    fn alignment_strategy() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(value_strategy().prop_filter("reads as missing", |v| v.as_str() != ABSENT_ALIGNMENT))
    }

    fn transformation_strategy() -> impl Strategy<Value = AttributeTransformation> {
        prop_oneof![
            Just(AttributeTransformation::NoChange),
            prop_oneof![Just(Axis::Horizontal), Just(Axis::Vertical)].prop_map(AttributeTransformation::reflection),
            any::<i32>().prop_map(AttributeTransformation::rotation),
            (value_strategy(), value_strategy()).prop_map(|(from, to)| AttributeTransformation::fill_change(from, to)),
            (-1.0e6f64..1.0e6).prop_map(AttributeTransformation::scale),
            (alignment_strategy(), alignment_strategy())
                .prop_map(|(from, to)| AttributeTransformation::alignment_change(from, to)),
            (value_strategy(), value_strategy()).prop_map(|(from, to)| AttributeTransformation::shape_change(from, to)),
            Just(AttributeTransformation::Creation),
            Just(AttributeTransformation::Deletion),
        ]
    }

    proptest! {
        /// Property: structural equality does not depend on argument order.
        #[test]
        fn structural_equality_is_symmetric(a in transformation_strategy(), b in transformation_strategy()) {
            prop_assert_eq!(a.structurally_equal(&b), b.structurally_equal(&a));
        }

        /// Property: every value is structurally equal to itself.
        #[test]
        fn structural_equality_is_reflexive(a in transformation_strategy()) {
            prop_assert!(a.structurally_equal(&a));
        }

        /// Property: values of different kinds are never equal.
        #[test]
        fn kind_mismatch_is_never_equal(a in transformation_strategy(), b in transformation_strategy()) {
            if a.kind() != b.kind() {
                prop_assert!(!a.structurally_equal(&b));
                prop_assert!(!b.structurally_equal(&a));
            }
        }

        /// Property: rotations are equal exactly when their degrees are.
        #[test]
        fn rotation_equal_iff_degrees_equal(a in any::<i32>(), b in any::<i32>()) {
            let (ra, rb) = (AttributeTransformation::rotation(a), AttributeTransformation::rotation(b));
            prop_assert_eq!(ra.structurally_equal(&rb), a == b);
            prop_assert!(ra.structurally_equal(&AttributeTransformation::rotation(a)));
        }

        /// Property: parsing the displayed notation gives back an equal value.
        #[test]
        fn parse_display_agreement(a in transformation_strategy()) {
            let text = a.to_string();
            let parsed: AttributeTransformation = text.parse().unwrap();
            prop_assert!(parsed.structurally_equal(&a), "{} parsed as {:?}", text, parsed);
            prop_assert_eq!(parsed.to_string(), text);
        }
    }
}
