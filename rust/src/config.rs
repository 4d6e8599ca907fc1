//! Configuration types for the path planner.

use pyo3::prelude::*;

/// Tunable weights and thresholds for graph construction and search.
#[pyclass]
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Weight of a Start edge into an entry module.
    #[pyo3(get, set)]
    pub entry_weight: f64,

    /// Weight of the edge from a module's last assessment to the next module.
    #[pyo3(get, set)]
    pub progression_weight: f64,

    /// Weight of the module-to-module edge when a module has no assessments.
    #[pyo3(get, set)]
    pub direct_progression_weight: f64,

    /// Weight of the edge from the last module to End.
    #[pyo3(get, set)]
    pub final_module_weight: f64,

    /// Weight of the edges from the last module's assessments to End.
    #[pyo3(get, set)]
    pub final_assessment_weight: f64,

    /// Assessment edge weight = assessment difficulty * this factor.
    #[pyo3(get, set)]
    pub assessment_edge_factor: f64,

    /// Number of leading modules that get Start edges when no start module
    /// is known.
    #[pyo3(get, set)]
    pub entry_window: usize,

    /// Divisor turning presentation length into module difficulty.
    #[pyo3(get, set)]
    pub difficulty_scale: f64,

    /// Module difficulty when the presentation length is missing.
    #[pyo3(get, set)]
    pub default_difficulty: f64,

    /// Heuristic sentinel for nodes that cannot reach the goal.
    #[pyo3(get, set)]
    pub unreachable_cost: f64,

    /// Paths shorter than this get a qualifier in the result notes.
    #[pyo3(get, set)]
    pub short_path_threshold: usize,

    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            entry_weight: 0.5,
            progression_weight: 2.0,
            direct_progression_weight: 2.5,
            final_module_weight: 1.5,
            final_assessment_weight: 1.0,
            assessment_edge_factor: 0.6,
            entry_window: 3,
            difficulty_scale: 50.0,
            default_difficulty: 3.0,
            unreachable_cost: 999.0,
            short_path_threshold: 3,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl PlannerConfig {
    #[new]
    #[pyo3(signature = (
        entry_weight=0.5,
        progression_weight=2.0,
        direct_progression_weight=2.5,
        final_module_weight=1.5,
        final_assessment_weight=1.0,
        assessment_edge_factor=0.6,
        entry_window=3,
        difficulty_scale=50.0,
        default_difficulty=3.0,
        unreachable_cost=999.0,
        short_path_threshold=3,
        verbosity=0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        entry_weight: f64,
        progression_weight: f64,
        direct_progression_weight: f64,
        final_module_weight: f64,
        final_assessment_weight: f64,
        assessment_edge_factor: f64,
        entry_window: usize,
        difficulty_scale: f64,
        default_difficulty: f64,
        unreachable_cost: f64,
        short_path_threshold: usize,
        verbosity: u8,
    ) -> Self {
        Self {
            entry_weight,
            progression_weight,
            direct_progression_weight,
            final_module_weight,
            final_assessment_weight,
            assessment_edge_factor,
            entry_window,
            difficulty_scale,
            default_difficulty,
            unreachable_cost,
            short_path_threshold,
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlannerConfig(entry_weight={}, progression_weight={}, entry_window={})",
            self.entry_weight, self.progression_weight, self.entry_window
        )
    }
}
