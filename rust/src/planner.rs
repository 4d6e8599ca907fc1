//! Planning orchestration: start-module resolution, graph construction,
//! search, and result assembly.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::PlannerConfig;
use crate::graph::{build_graph, GraphError, NodeKind};
use crate::log_changes;
use crate::models::{
    AssessmentRecord, CourseRecord, LearningStyle, PlanResult, RiskLevel, StudentProfile,
    StudentType, SubmissionRecord, VleRecord,
};
use crate::search;

/// Marker reported in `start_module_used` when no start module could be
/// resolved from the student's history.
pub const FALLBACK_START: &str = "fallback";

const PLAN_NOTE: &str =
    "Path planned with personalized A* over curriculum records (chronological module order plus assessments)";

/// Errors that abort a planning call. Everything else resolves into a
/// (possibly degenerate) `PlanResult`.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid student_type {0:?} (expected \"existing\" or \"new\")")]
    InvalidProfile(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// In-memory relational tables the planner consumes. Assumed pre-cleaned by
/// the data-loading agent.
#[derive(Clone, Debug, Default)]
pub struct CurriculumTables {
    pub courses: Vec<CourseRecord>,
    pub assessments: Vec<AssessmentRecord>,
    pub student_assessments: Vec<SubmissionRecord>,
    pub student_vle: Vec<VleRecord>,
}

/// Most recent module a student touched: latest dated submission that maps
/// to a known module, else latest dated VLE interaction. Rows without dates
/// lose to dated rows.
fn resolve_from_history(student_id: i64, tables: &CurriculumTables) -> Option<String> {
    let module_of: FxHashMap<&str, &str> = tables
        .assessments
        .iter()
        .map(|a| (a.id_assessment.as_str(), a.code_module.as_str()))
        .collect();

    let mut best: Option<(f64, &str)> = None;
    for row in tables
        .student_assessments
        .iter()
        .filter(|r| r.id_student == student_id)
    {
        let Some(&module) = module_of.get(row.id_assessment.as_str()) else {
            continue;
        };
        let date = row.date_submitted.unwrap_or(f64::NEG_INFINITY);
        if best.is_none_or(|(d, _)| date > d) {
            best = Some((date, module));
        }
    }
    if let Some((_, module)) = best {
        return Some(module.to_string());
    }

    let mut best: Option<(f64, &str)> = None;
    for row in tables
        .student_vle
        .iter()
        .filter(|r| r.id_student == student_id)
    {
        let date = row.date.unwrap_or(f64::NEG_INFINITY);
        if best.is_none_or(|(d, _)| date > d) {
            best = Some((date, row.code_module.as_str()));
        }
    }
    best.map(|(_, module)| module.to_string())
}

fn resolve_start_module(
    student_type: StudentType,
    profile: &StudentProfile,
    tables: &CurriculumTables,
) -> Option<String> {
    match student_type {
        StudentType::Existing => profile
            .student_id
            .and_then(|id| resolve_from_history(id, tables)),
        StudentType::New => profile.preferred_module.clone(),
    }
}

/// Plan a personalized learning path for one student profile.
///
/// Builds a fresh graph for this request, searches Start to End, strips the
/// sentinels and annotates the result. Only a malformed `student_type` or a
/// data-quality problem in the assessment ids is an error; an unreachable
/// goal comes back as an empty path with an explanatory note.
pub fn plan(
    profile: &StudentProfile,
    tables: &CurriculumTables,
    config: &PlannerConfig,
) -> Result<PlanResult, PlannerError> {
    let student_type = StudentType::parse(&profile.student_type)
        .ok_or_else(|| PlannerError::InvalidProfile(profile.student_type.clone()))?;
    let style = LearningStyle::parse(&profile.learning_style);
    let risk = RiskLevel::parse(&profile.risk_level);

    let resolved = resolve_start_module(student_type, profile, tables);

    // With no signal at all, enter at the first module in curriculum order;
    // the result still reports the fallback marker.
    let first_module = {
        let mut codes: Vec<&str> = tables
            .courses
            .iter()
            .map(|c| c.code_module.as_str())
            .collect();
        codes.sort_unstable();
        codes.first().map(|s| s.to_string())
    };
    let (start_module, start_module_used) = match resolved {
        Some(module) => (Some(module.clone()), module),
        None => (first_module, FALLBACK_START.to_string()),
    };
    log_changes!(
        config.verbosity,
        "start module resolved: {}",
        start_module_used
    );

    let graph = build_graph(
        &tables.courses,
        &tables.assessments,
        start_module.as_deref(),
        config,
    )?;
    let path = search::astar(&graph, graph.start(), graph.end(), style, risk, config);

    let planned_path: Vec<String> = path
        .iter()
        .map(|&id| graph.node(id))
        .filter(|n| matches!(n.kind, NodeKind::Module | NodeKind::Assessment))
        .map(|n| n.name.clone())
        .collect();

    let notes = if planned_path.is_empty() {
        "No valid path found through the curriculum; consider re-profiling the student".to_string()
    } else if planned_path.len() < config.short_path_threshold {
        format!("{PLAN_NOTE} (short path: limited student history or few assessments)")
    } else {
        PLAN_NOTE.to_string()
    };

    Ok(PlanResult {
        path_length: planned_path.len(),
        planned_path,
        start_module_used,
        adapted_to_style: profile.learning_style.clone(),
        adapted_to_risk: profile.risk_level.clone(),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> CourseRecord {
        CourseRecord {
            code_module: code.to_string(),
            presentation_length: None,
        }
    }

    fn assessment(module: &str, id: &str, kind: &str, date: Option<f64>) -> AssessmentRecord {
        AssessmentRecord {
            code_module: module.to_string(),
            id_assessment: id.to_string(),
            assessment_type: kind.to_string(),
            date,
        }
    }

    fn submission(student: i64, id: &str, date: Option<f64>) -> SubmissionRecord {
        SubmissionRecord {
            id_student: student,
            id_assessment: id.to_string(),
            date_submitted: date,
        }
    }

    fn vle(student: i64, module: &str, date: Option<f64>) -> VleRecord {
        VleRecord {
            id_student: student,
            code_module: module.to_string(),
            date,
        }
    }

    fn existing_profile(student_id: Option<i64>) -> StudentProfile {
        StudentProfile {
            student_type: "existing".to_string(),
            student_id,
            preferred_module: None,
            learning_style: "visual".to_string(),
            risk_level: "medium".to_string(),
            mean_score: None,
        }
    }

    fn new_profile(preferred: &str, style: &str) -> StudentProfile {
        StudentProfile {
            student_type: "new".to_string(),
            student_id: None,
            preferred_module: Some(preferred.to_string()),
            learning_style: style.to_string(),
            risk_level: "medium".to_string(),
            mean_score: None,
        }
    }

    fn tables(
        courses: Vec<CourseRecord>,
        assessments: Vec<AssessmentRecord>,
        student_assessments: Vec<SubmissionRecord>,
        student_vle: Vec<VleRecord>,
    ) -> CurriculumTables {
        CurriculumTables {
            courses,
            assessments,
            student_assessments,
            student_vle,
        }
    }

    #[test]
    fn test_no_history_walks_curriculum_from_first_module() {
        let tables = tables(
            vec![course("BBB"), course("CCC"), course("DDD")],
            vec![],
            vec![],
            vec![],
        );
        let result = plan(
            &existing_profile(Some(42)),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(result.planned_path, vec!["BBB", "CCC", "DDD"]);
        assert_eq!(result.path_length, 3);
        assert_eq!(result.start_module_used, FALLBACK_START);
        assert!(!result.notes.contains("short path"));
    }

    #[test]
    fn test_practice_learner_walks_assessment_chain() {
        let tables = tables(
            vec![course("AAA"), course("BBB")],
            vec![
                assessment("AAA", "1", "CMA", Some(10.0)),
                assessment("AAA", "2", "TMA", Some(20.0)),
            ],
            vec![],
            vec![],
        );
        let result = plan(
            &new_profile("AAA", "practice"),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(
            result.planned_path,
            vec!["AAA", "AAA_ass_1", "AAA_ass_2", "BBB"]
        );
        assert_eq!(result.start_module_used, "AAA");
        assert_eq!(result.adapted_to_style, "practice");
    }

    #[test]
    fn test_empty_curriculum_reports_no_path() {
        let tables = tables(vec![], vec![], vec![], vec![]);
        let result = plan(
            &existing_profile(Some(1)),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();

        assert!(result.planned_path.is_empty());
        assert_eq!(result.path_length, 0);
        assert_eq!(result.start_module_used, FALLBACK_START);
        assert!(result.notes.contains("No valid path"));
    }

    #[test]
    fn test_invalid_student_type_is_an_error() {
        let tables = tables(vec![course("AAA")], vec![], vec![], vec![]);
        let mut profile = existing_profile(Some(1));
        profile.student_type = "alumni".to_string();

        let err = plan(&profile, &tables, &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidProfile(t) if t == "alumni"));
    }

    #[test]
    fn test_latest_submission_sets_start_module() {
        let tables = tables(
            vec![course("AAA"), course("BBB"), course("CCC")],
            vec![
                assessment("AAA", "11", "CMA", Some(10.0)),
                assessment("BBB", "22", "TMA", Some(20.0)),
            ],
            vec![submission(7, "11", Some(5.0)), submission(7, "22", Some(30.0))],
            vec![],
        );
        let result = plan(
            &existing_profile(Some(7)),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(result.start_module_used, "BBB");
        assert_eq!(result.planned_path.first().map(String::as_str), Some("BBB"));
    }

    #[test]
    fn test_submission_to_unknown_assessment_is_ignored() {
        let tables = tables(
            vec![course("AAA"), course("BBB")],
            vec![assessment("AAA", "11", "CMA", Some(10.0))],
            // The later submission references an assessment missing from the
            // assessments relation and must not win.
            vec![submission(7, "11", Some(5.0)), submission(7, "99", Some(50.0))],
            vec![],
        );
        let result = plan(
            &existing_profile(Some(7)),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(result.start_module_used, "AAA");
    }

    #[test]
    fn test_vle_fallback_when_no_submissions() {
        let tables = tables(
            vec![course("AAA"), course("BBB"), course("CCC")],
            vec![],
            vec![],
            vec![vle(7, "AAA", Some(3.0)), vle(7, "CCC", Some(12.0))],
        );
        let result = plan(
            &existing_profile(Some(7)),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(result.start_module_used, "CCC");
        assert_eq!(result.planned_path, vec!["CCC"]);
        assert!(result.notes.contains("short path"));
    }

    #[test]
    fn test_unknown_preferred_module_enters_through_window() {
        let tables = tables(
            vec![course("AAA"), course("BBB"), course("CCC"), course("DDD")],
            vec![],
            vec![],
            vec![],
        );
        let result = plan(
            &new_profile("ZZZ", "text"),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap();

        // The unknown module is echoed, and the search enters through the
        // default entry window (deepest entry wins on cost).
        assert_eq!(result.start_module_used, "ZZZ");
        assert_eq!(result.planned_path, vec!["CCC", "DDD"]);
    }

    #[test]
    fn test_existing_student_without_id_degrades_to_fallback() {
        let tables = tables(vec![course("AAA"), course("BBB")], vec![], vec![], vec![]);
        let result = plan(&existing_profile(None), &tables, &PlannerConfig::default()).unwrap();

        assert_eq!(result.start_module_used, FALLBACK_START);
        assert_eq!(result.planned_path, vec!["AAA", "BBB"]);
        assert!(result.notes.contains("short path"));
    }

    #[test]
    fn test_plan_is_idempotent() {
        let tables = tables(
            vec![course("AAA"), course("BBB")],
            vec![
                assessment("AAA", "1", "CMA", Some(10.0)),
                assessment("AAA", "2", "TMA", Some(20.0)),
            ],
            vec![],
            vec![],
        );
        let profile = new_profile("AAA", "practice");
        let config = PlannerConfig::default();

        let first = plan(&profile, &tables, &config).unwrap();
        let second = plan(&profile, &tables, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_echoes_profile_adaptations() {
        let tables = tables(vec![course("AAA")], vec![], vec![], vec![]);
        let mut profile = new_profile("AAA", "visual");
        profile.risk_level = "high".to_string();

        let result = plan(&profile, &tables, &PlannerConfig::default()).unwrap();
        assert_eq!(result.adapted_to_style, "visual");
        assert_eq!(result.adapted_to_risk, "high");
    }

    #[test]
    fn test_non_numeric_assessment_id_propagates() {
        let tables = tables(
            vec![course("AAA")],
            vec![assessment("AAA", "final", "Exam", None)],
            vec![],
            vec![],
        );
        let err = plan(
            &new_profile("AAA", "text"),
            &tables,
            &PlannerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Graph(GraphError::NonNumericAssessmentId(_))
        ));
    }
}
