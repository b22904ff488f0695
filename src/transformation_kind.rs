use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of a detected change between two figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformationKind {
    NoChange,
    Reflection,
    Rotation,
    FillChange,
    Scale,
    AlignmentChange,
    ShapeChange,
    Creation,
    Deletion,
}

impl TransformationKind {
    /// Every kind, from the most benign change to the most structural one
    pub const ALL: [TransformationKind; 9] = [
        TransformationKind::NoChange,
        TransformationKind::Reflection,
        TransformationKind::Rotation,
        TransformationKind::FillChange,
        TransformationKind::Scale,
        TransformationKind::AlignmentChange,
        TransformationKind::ShapeChange,
        TransformationKind::Creation,
        TransformationKind::Deletion,
    ];

    /// Fixed weight of the kind. Higher means a lesser change.
    pub const fn base_weight(self) -> u32 {
        match self {
            TransformationKind::NoChange => 7,
            TransformationKind::Reflection => 6,
            TransformationKind::Rotation => 5,
            TransformationKind::FillChange => 4,
            TransformationKind::Scale => 3,
            TransformationKind::AlignmentChange => 2,
            TransformationKind::ShapeChange => 1,
            TransformationKind::Creation => 0,
            TransformationKind::Deletion => 0,
        }
    }

    /// Compare two kinds by base weight only. Creation and Deletion tie.
    pub fn compare_weight(self, other: Self) -> Ordering {
        self.base_weight().cmp(&other.base_weight())
    }

    /// Whether transformations of this kind carry a payload
    pub fn has_payload(self) -> bool {
        !matches!(
            self,
            TransformationKind::NoChange | TransformationKind::Creation | TransformationKind::Deletion
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TransformationKind::NoChange => "NoChange",
            TransformationKind::Reflection => "Reflection",
            TransformationKind::Rotation => "Rotation",
            TransformationKind::FillChange => "FillChange",
            TransformationKind::Scale => "Scale",
            TransformationKind::AlignmentChange => "AlignmentChange",
            TransformationKind::ShapeChange => "ShapeChange",
            TransformationKind::Creation => "Creation",
            TransformationKind::Deletion => "Deletion",
        }
    }
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformationKind {
    type Err = KindError;

    /// Accepts `NoChange`, `no_change`, `no-change` and any casing thereof
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        TransformationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().to_lowercase() == wanted)
            .ok_or_else(|| KindError::Unknown(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum KindError {
    #[error("Unknown transformation kind: {0}")]
    Unknown(String),
}
