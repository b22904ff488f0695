use serde::{Deserialize, Serialize};
use crate::{
    attribute_transformation::{is_alignment_notation_safe, is_notation_safe, ABSENT_ALIGNMENT},
    figure::Figure,
};

/// Validation report for a single figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation error with detailed information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub attribute_path: String,
    pub error_type: ValidationErrorType,
    pub message: String,
    pub suggested_fix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationErrorType {
    EmptyShape,
    EmptyFill,
    EmptyAlignment,
    ReservedAlignment,
    UnrepresentableValue,
    NonFiniteSize,
    NonPositiveSize,
}

/// Validation warning for attributes that are accepted but suspicious
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub attribute_path: String,
    pub warning_type: ValidationWarningType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationWarningType {
    AngleOutOfRange,
}

impl ValidationError {
    pub fn new(
        attribute_path: String,
        error_type: ValidationErrorType,
        message: String,
    ) -> Self {
        Self {
            attribute_path,
            error_type,
            message,
            suggested_fix: None,
        }
    }

    pub fn with_suggested_fix(mut self, fix: String) -> Self {
        self.suggested_fix = Some(fix);
        self
    }
}

impl ValidationWarning {
    pub fn new(
        attribute_path: String,
        warning_type: ValidationWarningType,
        message: String,
    ) -> Self {
        Self {
            attribute_path,
            warning_type,
            message,
        }
    }
}

fn unrepresentable(attribute_path: String, value: &str) -> ValidationError {
    ValidationError::new(
        attribute_path,
        ValidationErrorType::UnrepresentableValue,
        format!("Value {:?} cannot be written in transformation notation", value),
    )
    .with_suggested_fix("Drop surrounding whitespace, '->' and control characters".to_string())
}

/// Check that a figure can take part in transformation detection
pub fn validate_figure(figure: &Figure) -> ValidationReport {
    let mut report = ValidationReport::new();
    let path = |attribute: &str| format!("{}.{}", figure.name, attribute);

    if figure.shape.trim().is_empty() {
        report.add_error(
            ValidationError::new(
                path("shape"),
                ValidationErrorType::EmptyShape,
                "Shape must not be empty".to_string(),
            )
            .with_suggested_fix("Name the shape, e.g. 'circle' or 'square'".to_string()),
        );
    } else if !is_notation_safe(&figure.shape) {
        report.add_error(unrepresentable(path("shape"), &figure.shape));
    }

    if figure.fill.trim().is_empty() {
        report.add_error(
            ValidationError::new(
                path("fill"),
                ValidationErrorType::EmptyFill,
                "Fill must not be empty".to_string(),
            )
            .with_suggested_fix("Use 'no' for an unfilled figure".to_string()),
        );
    } else if !is_notation_safe(&figure.fill) {
        report.add_error(unrepresentable(path("fill"), &figure.fill));
    }

    if let Some(alignment) = figure.alignment.as_deref() {
        if alignment.trim().is_empty() {
            report.add_error(
                ValidationError::new(
                    path("alignment"),
                    ValidationErrorType::EmptyAlignment,
                    "Alignment is set but empty".to_string(),
                )
                .with_suggested_fix("Omit the alignment instead".to_string()),
            );
        } else if alignment.trim().eq_ignore_ascii_case(ABSENT_ALIGNMENT) {
            report.add_error(
                ValidationError::new(
                    path("alignment"),
                    ValidationErrorType::ReservedAlignment,
                    format!("Alignment '{}' reads as a missing alignment", alignment),
                )
                .with_suggested_fix("Omit the alignment instead".to_string()),
            );
        } else if !is_alignment_notation_safe(alignment) {
            report.add_error(unrepresentable(path("alignment"), alignment));
        }
    }

    if !figure.size.is_finite() {
        report.add_error(ValidationError::new(
            path("size"),
            ValidationErrorType::NonFiniteSize,
            format!("Size must be a finite number, got {}", figure.size),
        ));
    } else if figure.size <= 0.0 {
        report.add_error(
            ValidationError::new(
                path("size"),
                ValidationErrorType::NonPositiveSize,
                format!("Size must be positive, got {}", figure.size),
            )
            .with_suggested_fix("Use a relative size such as 1.0".to_string()),
        );
    }

    if !(0..360).contains(&figure.angle) {
        report.add_warning(ValidationWarning::new(
            path("angle"),
            ValidationWarningType::AngleOutOfRange,
            format!(
                "Angle {} is outside 0..360 and will be read as {}",
                figure.angle,
                figure.normalized_angle()
            ),
        ));
    }

    report
}
