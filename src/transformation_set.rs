use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attribute_transformation::AttributeTransformation;
use crate::transformation_kind::TransformationKind;

/// All transformations that take one figure to another
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationSet {
    transformations: Vec<AttributeTransformation>,
}

impl TransformationSet {
    pub fn new(transformations: Vec<AttributeTransformation>) -> Self {
        Self { transformations }
    }

    pub fn push(&mut self, transformation: AttributeTransformation) {
        self.transformations.push(transformation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeTransformation> {
        self.transformations.iter()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    pub fn kinds(&self) -> Vec<TransformationKind> {
        self.transformations.iter().map(|t| t.kind()).collect()
    }

    /// Sum of base weights. Higher means the figures are closer.
    pub fn score(&self) -> u32 {
        self.transformations.iter().map(|t| t.base_weight()).sum()
    }

    /// The most severe change, i.e. the lowest base weight. First one wins on ties.
    pub fn dominant(&self) -> Option<&AttributeTransformation> {
        self.transformations
            .iter()
            .reduce(|best, t| if t.base_weight() < best.base_weight() { t } else { best })
    }

    /// One-to-one pairing of structurally equal members, ignoring order
    pub fn structurally_equal(&self, other: &TransformationSet) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut matched = vec![false; other.len()];

        for transformation in &self.transformations {
            let partner = other
                .transformations
                .iter()
                .enumerate()
                .position(|(j, candidate)| !matched[j] && transformation.structurally_equal(candidate));

            match partner {
                Some(j) => matched[j] = true,
                None => return false,
            }
        }

        true
    }
}

impl From<Vec<AttributeTransformation>> for TransformationSet {
    fn from(transformations: Vec<AttributeTransformation>) -> Self {
        Self::new(transformations)
    }
}

impl<'a> IntoIterator for &'a TransformationSet {
    type Item = &'a AttributeTransformation;
    type IntoIter = std::slice::Iter<'a, AttributeTransformation>;

    fn into_iter(self) -> Self::IntoIter {
        self.transformations.iter()
    }
}

impl fmt::Display for TransformationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.transformations.iter().map(|t| t.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
