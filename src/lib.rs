// Attribute transformations between compared figures
pub mod transformation_kind;
pub mod attribute_transformation;
pub mod transformation_set;
pub mod figure;
pub mod validation;
pub mod detector;
pub mod reporter;
pub mod config;

// Re-export core types for convenience
pub use transformation_kind::{TransformationKind, KindError};
pub use attribute_transformation::{AttributeTransformation, Axis, NotationError, StructuralEq};
pub use transformation_set::TransformationSet;
pub use figure::{Figure, FigurePair, FigureDocument, DocumentError};
pub use validation::{validate_figure, ValidationReport, ValidationError, ValidationWarning};
pub use detector::{best_candidate, DetectionError, TransformationDetector, PairDetection, DetectionWarning};
pub use reporter::{ComparisonReporter, ComparisonReport, ReportFormat};
pub use config::{ComparisonConfig, ConfigError};
