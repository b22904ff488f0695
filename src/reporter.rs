use serde::{Deserialize, Serialize};
use crate::{
    attribute_transformation::AttributeTransformation,
    detector::{DetectionWarning, DetectionWarningType, PairDetection},
    transformation_kind::TransformationKind,
};

/// Reporter for generating comparison reports in various formats
pub struct ComparisonReporter {
    output_format: ReportFormat,
    include_no_change: bool,
}

/// Available output formats for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Console,
    Json,
    Yaml,
}

/// Comprehensive comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub pairs: Vec<PairReport>,
    pub kind_counts: Vec<KindCount>,
    pub warnings: Vec<String>,
    pub summary: ComparisonSummary,
}

/// One compared pair, transformations in notation form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    pub name: String,
    pub transformations: Vec<String>,
    pub score: u32,
    pub dominant: Option<TransformationKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: TransformationKind,
    pub base_weight: u32,
    pub count: usize,
}

/// Summary of comparison results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_pairs: usize,
    pub skipped_pairs: usize,
    pub unchanged_pairs: usize,
    pub total_score: u32,
}

impl ComparisonReporter {
    pub fn new() -> Self {
        Self {
            output_format: ReportFormat::Console,
            include_no_change: true,
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_include_no_change(mut self, include_no_change: bool) -> Self {
        self.include_no_change = include_no_change;
        self
    }

    /// Generate a comparison report. Scores always cover the full set, even when
    /// `NoChange` entries are hidden.
    pub fn generate_report(
        &self,
        detections: &[PairDetection],
        warnings: &[DetectionWarning],
    ) -> ComparisonReport {
        let pairs: Vec<PairReport> = detections.iter().map(|d| self.create_pair_report(d)).collect();
        let kind_counts = self.count_kinds(detections);
        let summary = self.create_summary(detections, warnings);

        ComparisonReport {
            pairs,
            kind_counts,
            warnings: warnings.iter().map(|w| w.message.clone()).collect(),
            summary,
        }
    }

    /// Format the report according to the configured output format
    pub fn format_report(&self, report: &ComparisonReport) -> Result<String, ReportError> {
        match self.output_format {
            ReportFormat::Console => Ok(self.format_console_report(report)),
            ReportFormat::Json => self.format_json_report(report),
            ReportFormat::Yaml => self.format_yaml_report(report),
        }
    }

    fn is_shown(&self, transformation: &AttributeTransformation) -> bool {
        self.include_no_change || transformation.kind() != TransformationKind::NoChange
    }

    fn create_pair_report(&self, detection: &PairDetection) -> PairReport {
        PairReport {
            name: detection.name.clone(),
            transformations: detection
                .transformations
                .iter()
                .filter(|t| self.is_shown(t))
                .map(|t| t.to_string())
                .collect(),
            score: detection.transformations.score(),
            dominant: detection.transformations.dominant().map(|t| t.kind()),
        }
    }

    /// Count shown transformations per kind, in base weight order
    fn count_kinds(&self, detections: &[PairDetection]) -> Vec<KindCount> {
        TransformationKind::ALL
            .iter()
            .map(|&kind| KindCount {
                kind,
                base_weight: kind.base_weight(),
                count: detections
                    .iter()
                    .flat_map(|d| d.transformations.iter())
                    .filter(|t| t.kind() == kind && self.is_shown(t))
                    .count(),
            })
            .filter(|c| c.count > 0)
            .collect()
    }

    fn create_summary(&self, detections: &[PairDetection], warnings: &[DetectionWarning]) -> ComparisonSummary {
        let skipped_pairs = warnings
            .iter()
            .filter(|w| w.warning_type == DetectionWarningType::InvalidFigure)
            .count();
        let unchanged_pairs = detections
            .iter()
            .filter(|d| d.transformations.kinds() == vec![TransformationKind::NoChange])
            .count();

        ComparisonSummary {
            total_pairs: detections.len() + skipped_pairs,
            skipped_pairs,
            unchanged_pairs,
            total_score: detections.iter().map(|d| d.transformations.score()).sum(),
        }
    }

    /// Format report for console output
    fn format_console_report(&self, report: &ComparisonReport) -> String {
        let mut output = String::new();

        output.push_str("=== Attribute Transformation Report ===\n\n");

        for pair in &report.pairs {
            let listed = if pair.transformations.is_empty() {
                "-".to_string()
            } else {
                pair.transformations.join(", ")
            };
            output.push_str(&format!("{} (score {}): {}\n", pair.name, pair.score, listed));
        }

        if !report.kind_counts.is_empty() {
            output.push_str("\nKinds:\n");
            for count in &report.kind_counts {
                output.push_str(&format!(
                    "  {:<16} weight {}  x{}\n",
                    count.kind.to_string(),
                    count.base_weight,
                    count.count
                ));
            }
        }

        output.push_str(&format!(
            "\nPairs: {} ({} skipped, {} unchanged)\n",
            report.summary.total_pairs, report.summary.skipped_pairs, report.summary.unchanged_pairs
        ));
        output.push_str(&format!("Total score: {}\n", report.summary.total_score));

        if !report.warnings.is_empty() {
            output.push_str("\nWarnings:\n");
            for warning in &report.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
        }

        output
    }

    /// Format report as JSON
    fn format_json_report(&self, report: &ComparisonReport) -> Result<String, ReportError> {
        serde_json::to_string_pretty(report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    /// Format report as YAML
    fn format_yaml_report(&self, report: &ComparisonReport) -> Result<String, ReportError> {
        serde_yaml::to_string(report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for ComparisonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
