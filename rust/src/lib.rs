//! Rust core of the study-path planning agent.
//!
//! Builds a curriculum graph from tabular course records and runs a
//! personalized A* search over it. The Python side handles data loading and
//! student profiling; this crate owns graph construction, the heuristic, the
//! search, and the planning orchestration. Everything is also usable as a
//! plain Rust library (rlib) without the Python bindings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod config;
pub mod graph;
pub mod heuristic;
pub mod logging;
pub mod models;
pub mod planner;
pub mod search;

pub use config::PlannerConfig;
pub use graph::{build_graph, CurriculumGraph, GraphError, Node, NodeId, NodeKind};
pub use models::{
    AssessmentRecord, CourseRecord, LearningStyle, PlanResult, RiskLevel, StudentProfile,
    StudentType, SubmissionRecord, VleRecord,
};
pub use planner::{plan, CurriculumTables, PlannerError, FALLBACK_START};

/// Plan a personalized learning path for one student.
///
/// Takes the profile plus the four curriculum relations as lists of records
/// and returns a `PlanResult`. Raises `ValueError` on a malformed profile or
/// a non-numeric assessment id.
#[pyfunction]
#[pyo3(signature = (profile, courses, assessments, student_assessments, student_vle, config=None))]
fn plan_path(
    profile: StudentProfile,
    courses: Vec<CourseRecord>,
    assessments: Vec<AssessmentRecord>,
    student_assessments: Vec<SubmissionRecord>,
    student_vle: Vec<VleRecord>,
    config: Option<PlannerConfig>,
) -> PyResult<PlanResult> {
    let tables = CurriculumTables {
        courses,
        assessments,
        student_assessments,
        student_vle,
    };
    let config = config.unwrap_or_default();
    planner::plan(&profile, &tables, &config).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn studypath_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CourseRecord>()?;
    m.add_class::<AssessmentRecord>()?;
    m.add_class::<SubmissionRecord>()?;
    m.add_class::<VleRecord>()?;
    m.add_class::<StudentProfile>()?;
    m.add_class::<PlanResult>()?;
    m.add_class::<PlannerConfig>()?;
    m.add_function(wrap_pyfunction!(plan_path, m)?)?;
    Ok(())
}
