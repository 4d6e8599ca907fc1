//! Core data types for the path-planning system.

use pyo3::prelude::*;

// Note: records keep the column names of the source relations so the Python
// data-loading agent can pass rows through without renaming.

/// One row of the courses relation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CourseRecord {
    #[pyo3(get, set)]
    pub code_module: String,
    /// Presentation length in days, when known.
    #[pyo3(get, set)]
    pub presentation_length: Option<f64>,
}

#[pymethods]
impl CourseRecord {
    #[new]
    #[pyo3(signature = (code_module, presentation_length=None))]
    fn new(code_module: String, presentation_length: Option<f64>) -> Self {
        Self {
            code_module,
            presentation_length,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CourseRecord(code_module={:?}, presentation_length={:?})",
            self.code_module, self.presentation_length
        )
    }
}

/// One row of the assessments relation.
///
/// Assessment ids are kept as strings; ordering within a module needs a
/// numeric parse, and a non-numeric id is rejected as a data-quality error.
#[pyclass]
#[derive(Clone, Debug)]
pub struct AssessmentRecord {
    #[pyo3(get, set)]
    pub code_module: String,
    #[pyo3(get, set)]
    pub id_assessment: String,
    /// "CMA", "TMA", "Exam", or another label.
    #[pyo3(get, set)]
    pub assessment_type: String,
    /// Day offset within the presentation, when known.
    #[pyo3(get, set)]
    pub date: Option<f64>,
}

#[pymethods]
impl AssessmentRecord {
    #[new]
    #[pyo3(signature = (code_module, id_assessment, assessment_type, date=None))]
    fn new(
        code_module: String,
        id_assessment: String,
        assessment_type: String,
        date: Option<f64>,
    ) -> Self {
        Self {
            code_module,
            id_assessment,
            assessment_type,
            date,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AssessmentRecord(code_module={:?}, id_assessment={:?}, assessment_type={:?})",
            self.code_module, self.id_assessment, self.assessment_type
        )
    }
}

/// One row of the student assessment submissions relation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SubmissionRecord {
    #[pyo3(get, set)]
    pub id_student: i64,
    #[pyo3(get, set)]
    pub id_assessment: String,
    #[pyo3(get, set)]
    pub date_submitted: Option<f64>,
}

#[pymethods]
impl SubmissionRecord {
    #[new]
    #[pyo3(signature = (id_student, id_assessment, date_submitted=None))]
    fn new(id_student: i64, id_assessment: String, date_submitted: Option<f64>) -> Self {
        Self {
            id_student,
            id_assessment,
            date_submitted,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SubmissionRecord(id_student={}, id_assessment={:?}, date_submitted={:?})",
            self.id_student, self.id_assessment, self.date_submitted
        )
    }
}

/// One row of the student VLE interactions relation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct VleRecord {
    #[pyo3(get, set)]
    pub id_student: i64,
    #[pyo3(get, set)]
    pub code_module: String,
    #[pyo3(get, set)]
    pub date: Option<f64>,
}

#[pymethods]
impl VleRecord {
    #[new]
    #[pyo3(signature = (id_student, code_module, date=None))]
    fn new(id_student: i64, code_module: String, date: Option<f64>) -> Self {
        Self {
            id_student,
            code_module,
            date,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "VleRecord(id_student={}, code_module={:?}, date={:?})",
            self.id_student, self.code_module, self.date
        )
    }
}

/// Student profile produced by the profiling agent.
#[pyclass]
#[derive(Clone, Debug)]
pub struct StudentProfile {
    /// "existing" or "new"; anything else is a contract violation.
    #[pyo3(get, set)]
    pub student_type: String,
    #[pyo3(get, set)]
    pub student_id: Option<i64>,
    #[pyo3(get, set)]
    pub preferred_module: Option<String>,
    /// "visual", "text", or "practice".
    #[pyo3(get, set)]
    pub learning_style: String,
    /// "low", "medium", or "high".
    #[pyo3(get, set)]
    pub risk_level: String,
    /// Informational only; the planner does not consume it.
    #[pyo3(get, set)]
    pub mean_score: Option<f64>,
}

#[pymethods]
impl StudentProfile {
    #[new]
    #[pyo3(signature = (
        student_type,
        learning_style,
        risk_level,
        student_id=None,
        preferred_module=None,
        mean_score=None
    ))]
    fn new(
        student_type: String,
        learning_style: String,
        risk_level: String,
        student_id: Option<i64>,
        preferred_module: Option<String>,
        mean_score: Option<f64>,
    ) -> Self {
        Self {
            student_type,
            student_id,
            preferred_module,
            learning_style,
            risk_level,
            mean_score,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "StudentProfile(student_type={:?}, student_id={:?}, learning_style={:?}, risk_level={:?})",
            self.student_type, self.student_id, self.learning_style, self.risk_level
        )
    }
}

/// Result from a planning call.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanResult {
    /// Ordered module and assessment node names; sentinels excluded.
    #[pyo3(get, set)]
    pub planned_path: Vec<String>,
    #[pyo3(get, set)]
    pub path_length: usize,
    /// Resolved start module, or the fallback marker when none was found.
    #[pyo3(get, set)]
    pub start_module_used: String,
    #[pyo3(get, set)]
    pub adapted_to_style: String,
    #[pyo3(get, set)]
    pub adapted_to_risk: String,
    #[pyo3(get, set)]
    pub notes: String,
}

#[pymethods]
impl PlanResult {
    fn __repr__(&self) -> String {
        format!(
            "PlanResult(path_length={}, start_module_used={:?})",
            self.path_length, self.start_module_used
        )
    }
}

/// Parsed student type; strict, unlike the style and risk parses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentType {
    Existing,
    New,
}

impl StudentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "existing" => Some(Self::Existing),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

/// Learning style used by the heuristic; unknown labels get no adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LearningStyle {
    Visual,
    Text,
    Practice,
    Unspecified,
}

impl LearningStyle {
    pub fn parse(s: &str) -> Self {
        match s {
            "visual" => Self::Visual,
            "text" => Self::Text,
            "practice" => Self::Practice,
            _ => Self::Unspecified,
        }
    }
}

/// Risk level used by the heuristic; unknown labels behave like medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn parse(s: &str) -> Self {
        match s {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}
