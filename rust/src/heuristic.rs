//! Personalized cost estimates for the path search.
//!
//! The estimate starts from the true shortest-path distance to the goal and
//! is then skewed by the student's learning style and risk level. The skew
//! can both raise and lower the estimate, so it is deliberately not
//! admissible: the search becomes a biased best-first exploration that
//! favors content suiting the profile instead of a strict shortest path.
//! Do not "fix" this into an admissible heuristic; the bias is the feature.

use crate::config::PlannerConfig;
use crate::graph::{CurriculumGraph, NodeId, NodeKind};
use crate::models::{LearningStyle, RiskLevel};
use crate::search;

/// Assessments feel farther to visually-oriented learners.
const VISUAL_ASSESSMENT_PENALTY: f64 = 5.0;
/// And somewhat farther to text-oriented learners.
const TEXT_ASSESSMENT_PENALTY: f64 = 3.0;
/// Practice-oriented learners are pulled toward assessments.
const PRACTICE_ASSESSMENT_BONUS: f64 = 3.0;

/// High-risk students are steered away from nodes harder than this.
const HIGH_RISK_DIFFICULTY_THRESHOLD: f64 = 3.0;
const HIGH_RISK_PENALTY: f64 = 5.0;
/// Low-risk students are nudged toward moderately hard content.
const LOW_RISK_DIFFICULTY_THRESHOLD: f64 = 2.0;
const LOW_RISK_BONUS: f64 = 1.5;

/// Estimate the remaining cost from `node` to `goal` for one student.
///
/// Nodes with no directed path to the goal get the configured sentinel cost
/// (effectively "prune this") rather than infinity, so they still compare
/// cleanly against reachable candidates.
pub fn estimate(
    graph: &CurriculumGraph,
    node: NodeId,
    goal: NodeId,
    style: LearningStyle,
    risk: RiskLevel,
    config: &PlannerConfig,
) -> f64 {
    let Some(base) = search::shortest_path_cost(graph, node, goal) else {
        return config.unreachable_cost;
    };

    let mut cost = base;
    let n = graph.node(node);

    if n.kind == NodeKind::Assessment {
        cost += match style {
            LearningStyle::Visual => VISUAL_ASSESSMENT_PENALTY,
            LearningStyle::Text => TEXT_ASSESSMENT_PENALTY,
            LearningStyle::Practice => -PRACTICE_ASSESSMENT_BONUS,
            LearningStyle::Unspecified => 0.0,
        };
    }

    // Sentinels carry no difficulty, so the risk rules skip them.
    if matches!(n.kind, NodeKind::Module | NodeKind::Assessment) {
        match risk {
            RiskLevel::High if n.difficulty > HIGH_RISK_DIFFICULTY_THRESHOLD => {
                cost += HIGH_RISK_PENALTY;
            }
            RiskLevel::Low if n.difficulty > LOW_RISK_DIFFICULTY_THRESHOLD => {
                cost -= LOW_RISK_BONUS;
            }
            _ => {}
        }
    }

    cost
}
