//! Best-first search over the curriculum graph.
//!
//! Two traversals live here: a plain Dijkstra used as the heuristic's base
//! distance, and the personalized A* that produces the learning path. Both
//! key their frontier on cost with an insertion counter breaking ties, so
//! repeated runs over the same graph yield the same output regardless of
//! the underlying heap implementation.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::PlannerConfig;
use crate::graph::{CurriculumGraph, NodeId};
use crate::heuristic;
use crate::models::{LearningStyle, RiskLevel};
use crate::{log_checks, log_debug};

/// Frontier entry ordered by estimated total cost; equal costs pop in
/// insertion order (first-inserted wins).
#[derive(Clone, Debug)]
struct FrontierEntry {
    f: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower f = higher priority)
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Weighted shortest-path cost from `from` to `to`, ignoring all
/// personalization. `None` when no directed path exists.
pub fn shortest_path_cost(graph: &CurriculumGraph, from: NodeId, to: NodeId) -> Option<f64> {
    let mut dist: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist.insert(from, 0.0);
    heap.push(FrontierEntry {
        f: 0.0,
        seq,
        node: from,
    });

    while let Some(entry) = heap.pop() {
        if entry.node == to {
            return Some(entry.f);
        }
        if entry.f > dist.get(&entry.node).copied().unwrap_or(f64::INFINITY) {
            continue; // stale entry
        }
        for &(next, weight) in graph.neighbors(entry.node) {
            let candidate = entry.f + weight;
            if candidate < dist.get(&next).copied().unwrap_or(f64::INFINITY) {
                dist.insert(next, candidate);
                seq += 1;
                heap.push(FrontierEntry {
                    f: candidate,
                    seq,
                    node: next,
                });
            }
        }
    }

    None
}

/// Personalized A* from `start` to `goal`.
///
/// Returns the node sequence including both endpoints, or an empty vector
/// when the goal cannot be reached — an unreachable goal is a reportable
/// outcome, not an error.
pub fn astar(
    graph: &CurriculumGraph,
    start: NodeId,
    goal: NodeId,
    style: LearningStyle,
    risk: RiskLevel,
    config: &PlannerConfig,
) -> Vec<NodeId> {
    let mut open = BinaryHeap::new();
    let mut came_from: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut g_score: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut seq = 0u64;

    g_score.insert(start, 0.0);
    open.push(FrontierEntry {
        f: heuristic::estimate(graph, start, goal, style, risk, config),
        seq,
        node: start,
    });

    while let Some(entry) = open.pop() {
        if entry.node == goal {
            return reconstruct(&came_from, start, goal);
        }
        log_checks!(
            config.verbosity,
            "expanding {} (f={:.2})",
            graph.node(entry.node).name,
            entry.f
        );

        let current_g = g_score.get(&entry.node).copied().unwrap_or(f64::INFINITY);
        for &(next, weight) in graph.neighbors(entry.node) {
            let tentative = current_g + weight;
            if tentative < g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                came_from.insert(next, entry.node);
                g_score.insert(next, tentative);
                let f = tentative + heuristic::estimate(graph, next, goal, style, risk, config);
                log_debug!(
                    config.verbosity,
                    "  relax {} g={:.2} f={:.2}",
                    graph.node(next).name,
                    tentative,
                    f
                );
                seq += 1;
                open.push(FrontierEntry { f, seq, node: next });
            }
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &FxHashMap<NodeId, NodeId>, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
