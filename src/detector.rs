use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{
    attribute_transformation::{AttributeTransformation, Axis},
    config::ComparisonConfig,
    figure::{Figure, FigurePair},
    transformation_set::TransformationSet,
    validation::{validate_figure, ValidationReport},
};

/// Derives the transformations that take one figure to another
pub struct TransformationDetector {
    config: ComparisonConfig,
}

/// Transformations detected for one named pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairDetection {
    pub name: String,
    pub transformations: TransformationSet,
    pub validation_report: ValidationReport,
}

/// Warning generated while comparing pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionWarning {
    pub message: String,
    pub pair_name: Option<String>,
    pub warning_type: DetectionWarningType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetectionWarningType {
    InvalidFigure,
    EmptyPair,
}

impl TransformationDetector {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Detect the transformations between two optional figures.
    ///
    /// Figures are taken as they are: run [`validate_figure`] first, or go through
    /// [`compare_pairs`](Self::compare_pairs) which does.
    pub fn detect(&self, source: Option<&Figure>, target: Option<&Figure>) -> TransformationSet {
        match (source, target) {
            (None, None) => TransformationSet::default(),
            (None, Some(_)) => vec![AttributeTransformation::Creation].into(),
            (Some(_), None) => vec![AttributeTransformation::Deletion].into(),
            (Some(source), Some(target)) => self.detect_changes(source, target),
        }
    }

    fn detect_changes(&self, source: &Figure, target: &Figure) -> TransformationSet {
        let mut set = TransformationSet::default();

        if source.shape != target.shape {
            set.push(AttributeTransformation::shape_change(&source.shape, &target.shape));
        }

        if source.fill != target.fill {
            set.push(AttributeTransformation::fill_change(&source.fill, &target.fill));
        }

        if source.size != target.size {
            set.push(AttributeTransformation::scale(target.size / source.size));
        }

        let (from, to) = (source.normalized_angle(), target.normalized_angle());
        if from != to {
            let candidates = self.angle_candidates(from, to);
            if let Some(best) = best_candidate(&candidates) {
                log::debug!(
                    "{} -> {}: picked {} out of {} angle candidates",
                    source.name,
                    target.name,
                    best,
                    candidates.len()
                );
                set.push(best.clone());
            }
        }

        if source.alignment != target.alignment {
            set.push(AttributeTransformation::alignment_change(
                source.alignment.clone(),
                target.alignment.clone(),
            ));
        }

        if set.is_empty() {
            set.push(AttributeTransformation::NoChange);
        }

        set
    }

    /// Every transformation that explains an angle change, rotation last.
    ///
    /// Mirroring about the vertical axis maps an angle `a` to `180 - a`,
    /// about the horizontal axis to `-a`.
    pub fn angle_candidates(&self, from: i32, to: i32) -> Vec<AttributeTransformation> {
        let (from, to) = (from.rem_euclid(360), to.rem_euclid(360));
        let mut candidates = Vec::new();

        if self.config.prefer_reflection {
            if (180 - from).rem_euclid(360) == to {
                candidates.push(AttributeTransformation::reflection(Axis::Vertical));
            }
            if (-from).rem_euclid(360) == to {
                candidates.push(AttributeTransformation::reflection(Axis::Horizontal));
            }
        }

        candidates.push(AttributeTransformation::rotation((to - from).rem_euclid(360)));
        candidates
    }

    /// Validate and detect every pair. Pairs with an invalid figure are skipped.
    pub fn compare_pairs(&self, pairs: &[FigurePair]) -> (Vec<PairDetection>, Vec<DetectionWarning>) {
        let mut detections = Vec::new();
        let mut warnings = Vec::new();

        for pair in pairs {
            if pair.source.is_none() && pair.target.is_none() {
                warnings.push(
                    DetectionWarning::new(
                        format!("Pair {} has neither source nor target", pair.name),
                        DetectionWarningType::EmptyPair,
                    )
                    .with_pair_name(pair.name.clone()),
                );
            }

            let validation_report = validate_pair(pair);
            if !validation_report.is_valid {
                let reasons = error_messages(&validation_report);
                log::warn!("Skipping pair {}: {}", pair.name, reasons);
                warnings.push(
                    DetectionWarning::new(
                        format!("Pair {} was skipped: {}", pair.name, reasons),
                        DetectionWarningType::InvalidFigure,
                    )
                    .with_pair_name(pair.name.clone()),
                );
                continue;
            }

            let transformations = self.detect(pair.source.as_ref(), pair.target.as_ref());
            log::debug!("Pair {}: {}", pair.name, transformations);

            detections.push(PairDetection {
                name: pair.name.clone(),
                transformations,
                validation_report,
            });
        }

        (detections, warnings)
    }

    /// Whether two pairs change in the same way. Both pairs are validated first.
    pub fn analogous(&self, first: &FigurePair, second: &FigurePair) -> Result<bool, DetectionError> {
        for pair in [first, second] {
            let report = validate_pair(pair);
            if !report.is_valid {
                return Err(DetectionError::InvalidPair(pair.name.clone(), error_messages(&report)));
            }
        }

        let a = self.detect(first.source.as_ref(), first.target.as_ref());
        let b = self.detect(second.source.as_ref(), second.target.as_ref());
        Ok(a.structurally_equal(&b))
    }
}

impl Default for TransformationDetector {
    fn default() -> Self {
        Self::new(ComparisonConfig::default())
    }
}

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Pair {0} has invalid figures: {1}")]
    InvalidPair(String, String),
}

fn validate_pair(pair: &FigurePair) -> ValidationReport {
    let mut report = ValidationReport::new();
    for figure in pair.source.iter().chain(pair.target.iter()) {
        report.merge(validate_figure(figure));
    }
    report
}

fn error_messages(report: &ValidationReport) -> String {
    let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();
    messages.join("; ")
}

/// Highest base weight wins, the earliest candidate on ties
pub fn best_candidate(candidates: &[AttributeTransformation]) -> Option<&AttributeTransformation> {
    candidates
        .iter()
        .reduce(|best, t| if t.base_weight() > best.base_weight() { t } else { best })
}

impl DetectionWarning {
    pub fn new(message: String, warning_type: DetectionWarningType) -> Self {
        Self {
            message,
            pair_name: None,
            warning_type,
        }
    }

    pub fn with_pair_name(mut self, pair_name: String) -> Self {
        self.pair_name = Some(pair_name);
        self
    }
}
