//! Curriculum graph construction from course and assessment records.
//!
//! The graph is a DAG by construction: modules are totally ordered by their
//! code string (the sole proxy for curriculum progression) and every edge
//! points forward along that order, toward the End sentinel. A graph is
//! built fresh for each planning call and never mutated afterwards.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use thiserror::Error;

use crate::config::PlannerConfig;
use crate::log_changes;
use crate::models::{AssessmentRecord, CourseRecord};

/// Dense node index into the graph arena.
pub type NodeId = u32;

/// Kind of a curriculum node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Module,
    Assessment,
    Start,
    End,
}

/// A node in the curriculum graph.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// In [1.0, 5.0] for modules and assessments; sentinels carry 0.0.
    pub difficulty: f64,
}

/// Data-quality errors raised while building the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("assessment id is not numeric: {0:?}")]
    NonNumericAssessmentId(String),
}

/// Immutable directed weighted graph over curriculum nodes.
///
/// Nodes live in an arena indexed by `NodeId`; names are interned into a
/// lookup map. Adjacency lists keep insertion order, which together with
/// the deterministic build order makes traversal reproducible.
#[derive(Clone, Debug)]
pub struct CurriculumGraph {
    nodes: Vec<Node>,
    edges: Vec<Vec<(NodeId, f64)>>,
    ids: FxHashMap<String, NodeId>,
    edge_count: usize,
    start: NodeId,
    end: NodeId,
}

impl CurriculumGraph {
    /// Empty graph holding only the two sentinels.
    pub(crate) fn new() -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            ids: FxHashMap::default(),
            edge_count: 0,
            start: 0,
            end: 0,
        };
        graph.start = graph.add_node("Start", NodeKind::Start, 0.0);
        graph.end = graph.add_node("End", NodeKind::End, 0.0);
        graph
    }

    pub(crate) fn add_node(&mut self, name: &str, kind: NodeKind, difficulty: f64) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            name: name.to_string(),
            kind,
            difficulty,
        });
        self.edges.push(Vec::new());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub(crate) fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.edges[from as usize].push((to, weight));
        self.edge_count += 1;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn get_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, f64)] {
        &self.edges[id as usize]
    }

    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len() as NodeId
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }
}

/// Compare f64 sort keys, treating incomparable values as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn assessment_difficulty(assessment_type: &str) -> f64 {
    match assessment_type {
        "CMA" => 2.0,
        "TMA" | "Exam" => 4.0,
        _ => 3.5,
    }
}

fn module_difficulty(length: Option<f64>, config: &PlannerConfig) -> f64 {
    match length {
        Some(l) if l.is_finite() => (l / config.difficulty_scale).clamp(1.0, 5.0),
        _ => config.default_difficulty,
    }
}

/// Build the curriculum graph for one planning request.
///
/// Modules sort lexicographically. Each module's assessments are ordered by
/// `(date, numeric id)` with missing dates last and chained behind it, so
/// every assessment sits on a forward path; the chain tail carries the
/// progression edge to the next module. Start connects to the requested
/// start module when it names a known module, otherwise to the first
/// `entry_window` modules. The last module and its assessments connect
/// to End.
pub fn build_graph(
    courses: &[CourseRecord],
    assessments: &[AssessmentRecord],
    start_module: Option<&str>,
    config: &PlannerConfig,
) -> Result<CurriculumGraph, GraphError> {
    let mut graph = CurriculumGraph::new();

    // Distinct module codes; the first row wins when a module repeats.
    let mut lengths: FxHashMap<&str, Option<f64>> = FxHashMap::default();
    for course in courses {
        lengths
            .entry(course.code_module.as_str())
            .or_insert(course.presentation_length);
    }
    let mut module_codes: Vec<&str> = lengths.keys().copied().collect();
    module_codes.sort_unstable();

    let mut module_ids: Vec<NodeId> = Vec::with_capacity(module_codes.len());
    for &code in &module_codes {
        let difficulty = module_difficulty(lengths[code], config);
        module_ids.push(graph.add_node(code, NodeKind::Module, difficulty));
    }

    // Assessment chains: module -> first assessment -> ... -> last assessment.
    let mut chain_tails: Vec<Option<NodeId>> = Vec::with_capacity(module_codes.len());
    let mut assessment_nodes: Vec<Vec<NodeId>> = Vec::with_capacity(module_codes.len());
    for (i, &code) in module_codes.iter().enumerate() {
        let mut rows: Vec<(i64, &AssessmentRecord)> = Vec::new();
        for row in assessments.iter().filter(|r| r.code_module == code) {
            let numeric_id = row
                .id_assessment
                .trim()
                .parse::<i64>()
                .map_err(|_| GraphError::NonNumericAssessmentId(row.id_assessment.clone()))?;
            rows.push((numeric_id, row));
        }
        rows.sort_by(|(id_a, a), (id_b, b)| {
            cmp_f64(
                a.date.unwrap_or(f64::INFINITY),
                b.date.unwrap_or(f64::INFINITY),
            )
            .then(id_a.cmp(id_b))
        });

        let mut nodes = Vec::with_capacity(rows.len());
        let mut prev = module_ids[i];
        for (_, row) in &rows {
            let name = format!("{}_ass_{}", code, row.id_assessment);
            let difficulty = assessment_difficulty(&row.assessment_type);
            let id = graph.add_node(&name, NodeKind::Assessment, difficulty);
            graph.add_edge(prev, id, difficulty * config.assessment_edge_factor);
            nodes.push(id);
            prev = id;
        }
        chain_tails.push(nodes.last().copied());
        assessment_nodes.push(nodes);
    }

    // Forward progression: chain tail into the next module, or the module
    // itself when it has no assessments.
    for i in 0..module_ids.len().saturating_sub(1) {
        let next = module_ids[i + 1];
        match chain_tails[i] {
            Some(tail) => graph.add_edge(tail, next, config.progression_weight),
            None => graph.add_edge(module_ids[i], next, config.direct_progression_weight),
        }
    }

    // Entry edges.
    let start = graph.start();
    let resolved_entry = start_module
        .and_then(|code| graph.get_id(code))
        .filter(|&id| graph.node(id).kind == NodeKind::Module);
    match resolved_entry {
        Some(id) => graph.add_edge(start, id, config.entry_weight),
        None => {
            for &id in module_ids.iter().take(config.entry_window) {
                graph.add_edge(start, id, config.entry_weight);
            }
        }
    }

    // The last module and its assessments close out the curriculum.
    if let Some(&last) = module_ids.last() {
        let end = graph.end();
        graph.add_edge(last, end, config.final_module_weight);
        if let Some(nodes) = assessment_nodes.last() {
            for &id in nodes {
                graph.add_edge(id, end, config.final_assessment_weight);
            }
        }
    }

    log_changes!(
        config.verbosity,
        "curriculum graph built: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
