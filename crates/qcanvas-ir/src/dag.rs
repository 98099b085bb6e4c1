//! Qubit dependency graph over a gate sequence.
//!
//! Node `i` is gate `i`; an edge `a -> b` labelled `q` means gate `b` is the
//! next gate after `a` to touch qubit `q`. Circuit depth is the longest path
//! through this graph, counted in gates.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use crate::gate::GateApplication;
use crate::qubit::QubitId;

/// Dependency DAG built from an ordered gate list.
#[derive(Debug, Clone)]
pub struct DependencyDag {
    graph: DiGraph<usize, QubitId>,
}

impl DependencyDag {
    /// Build the DAG. Each gate depends on the previous gate on every qubit it touches.
    pub fn from_gates(gates: &[GateApplication]) -> Self {
        let mut graph = DiGraph::with_capacity(gates.len(), gates.len() * 2);
        let mut last_on_wire: FxHashMap<QubitId, NodeIndex> = FxHashMap::default();

        for (idx, gate) in gates.iter().enumerate() {
            let node = graph.add_node(idx);
            for qubit in gate.qubits() {
                if let Some(prev) = last_on_wire.insert(qubit, node) {
                    if prev != node {
                        graph.add_edge(prev, node, qubit);
                    }
                }
            }
        }

        Self { graph }
    }

    /// Number of gate nodes.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Layer index (1-based) of every gate: one more than its deepest predecessor.
    pub fn levels(&self) -> Vec<usize> {
        let mut levels = vec![0usize; self.graph.node_count()];

        // Edges only run from earlier gates to later ones, so index order is topological.
        for node in self.graph.node_indices() {
            let max_pred = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| levels[e.source().index()])
                .max()
                .unwrap_or(0);
            levels[node.index()] = max_pred + 1;
        }

        levels
    }

    /// Length of the longest dependency chain. Zero for an empty circuit.
    pub fn depth(&self) -> usize {
        self.levels().into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_empty_depth() {
        let dag = DependencyDag::from_gates(&[]);
        assert_eq!(dag.depth(), 0);
        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_parallel_gates_share_a_layer() {
        let gates = vec![
            GateApplication::new("h", [q(0)]),
            GateApplication::new("h", [q(1)]),
            GateApplication::new("h", [q(2)]),
        ];
        assert_eq!(DependencyDag::from_gates(&gates).depth(), 1);
    }

    #[test]
    fn test_chain_through_controls() {
        // h q0; cx q0,q1; x q1; z q2
        let gates = vec![
            GateApplication::new("h", [q(0)]),
            GateApplication::controlled("cx", [q(0)], [q(1)]),
            GateApplication::new("x", [q(1)]),
            GateApplication::new("z", [q(2)]),
        ];
        let dag = DependencyDag::from_gates(&gates);
        assert_eq!(dag.levels(), vec![1, 2, 3, 1]);
        assert_eq!(dag.depth(), 3);
    }

    #[test]
    fn test_two_qubit_gate_joins_wires() {
        let gates = vec![
            GateApplication::new("h", [q(0)]),
            GateApplication::new("x", [q(0)]),
            GateApplication::new("y", [q(1)]),
            GateApplication::new("swap", [q(0), q(1)]),
        ];
        let dag = DependencyDag::from_gates(&gates);
        assert_eq!(dag.depth(), 3);
    }
}
