//! A small graph of coordinate nodes and directed edges, with the commands that build it.

use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::shared::Shared;
use crate::traits::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node(pub i32, pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.0, self.1)
    }
}

/// Nodes and edges are counted, so adding something twice needs two removals before it is gone.
/// This keeps every add/remove pair an exact inverse even when the item already exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<Node, usize>,
    edges: BTreeMap<Edge, usize>,
}

fn increment<K: Ord>(counts: &mut BTreeMap<K, usize>, key: K) {
    *counts.entry(key).or_insert(0) += 1;
}

fn decrement<K: Ord>(counts: &mut BTreeMap<K, usize>, key: K) {
    if let Entry::Occupied(mut entry) = counts.entry(key) {
        if *entry.get() > 1 {
            *entry.get_mut() -= 1;
        } else {
            entry.remove();
        }
    }
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        increment(&mut self.nodes, node);
    }

    pub fn remove_node(&mut self, node: Node) {
        decrement(&mut self.nodes, node);
    }

    pub fn add_edge(&mut self, from: Node, to: Node) {
        increment(&mut self.edges, Edge(from, to));
    }

    pub fn remove_edge(&mut self, from: Node, to: Node) {
        decrement(&mut self.edges, Edge(from, to));
    }

    #[must_use]
    pub fn contains_node(&self, node: Node) -> bool {
        self.nodes.contains_key(&node)
    }

    #[must_use]
    pub fn contains_edge(&self, from: Node, to: Node) -> bool {
        self.edges.contains_key(&Edge(from, to))
    }

    /// How many times `node` has been added and not yet removed.
    #[must_use]
    pub fn node_count(&self, node: Node) -> usize {
        self.nodes.get(&node).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn edge_count(&self, from: Node, to: Node) -> usize {
        self.edges.get(&Edge(from, to)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn nodes(&self) -> BTreeSet<Node> {
        self.nodes.keys().copied().collect()
    }

    #[must_use]
    pub fn edges(&self) -> BTreeSet<Edge> {
        self.edges.keys().copied().collect()
    }
}

/// Adds `node` to the graph; rolling back removes it again.
pub struct AddNode {
    graph: Shared<Graph>,
    node: Node,
}

impl AddNode {
    #[must_use]
    pub fn new(graph: Shared<Graph>, node: Node) -> Self {
        Self { graph, node }
    }
}

impl Command for AddNode {
    fn execute(&self) {
        self.graph.lock().add_node(self.node);
    }

    fn rollback(&self) {
        self.graph.lock().remove_node(self.node);
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Owned(format!("add node {}", self.node))
    }
}

/// Connects `from` to `to`; rolling back removes the edge.
pub struct AddEdge {
    graph: Shared<Graph>,
    edge: Edge,
}

impl AddEdge {
    #[must_use]
    pub fn new(graph: Shared<Graph>, from: Node, to: Node) -> Self {
        Self {
            graph,
            edge: Edge(from, to),
        }
    }
}

impl Command for AddEdge {
    fn execute(&self) {
        let Edge(from, to) = self.edge;
        self.graph.lock().add_edge(from, to);
    }

    fn rollback(&self) {
        let Edge(from, to) = self.edge;
        self.graph.lock().remove_edge(from, to);
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Owned(format!("add edge {}", self.edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph() {
        let mut graph = Graph::new();
        graph.add_node(Node(0, 0));
        graph.add_node(Node(1, 1));
        assert_eq!(
            graph.nodes().iter().copied().collect::<Vec<_>>(),
            [Node(0, 0), Node(1, 1)]
        );

        graph.remove_node(Node(1, 1));
        assert!(!graph.contains_node(Node(1, 1)));
        assert!(graph.contains_node(Node(0, 0)));

        graph.add_edge(Node(0, 0), Node(1, 1));
        assert!(graph.contains_edge(Node(0, 0), Node(1, 1)));
        assert!(!graph.contains_edge(Node(1, 1), Node(0, 0)));
    }

    #[test]
    fn test_add_node_inverse_law() {
        let graph = Shared::new(Graph::new());
        graph.lock().add_node(Node(5, 5));
        let before = graph.lock().clone();

        let cmd = AddNode::new(graph.clone(), Node(2, 3));
        cmd.execute();
        assert!(graph.lock().contains_node(Node(2, 3)));
        cmd.rollback();
        assert_eq!(*graph.lock(), before);
    }

    #[test]
    fn test_add_edge_inverse_law() {
        let graph = Shared::new(Graph::new());
        let before = graph.lock().clone();

        let cmd = AddEdge::new(graph.clone(), Node(0, 0), Node(1, 1));
        cmd.execute();
        assert_eq!(
            graph.lock().edges().iter().copied().collect::<Vec<_>>(),
            [Edge(Node(0, 0), Node(1, 1))]
        );
        cmd.rollback();
        assert_eq!(*graph.lock(), before);
    }

    #[test]
    fn test_repeated_add_needs_matching_removes() {
        let mut graph = Graph::new();
        graph.add_node(Node(0, 0));
        graph.add_node(Node(0, 0));
        assert_eq!(graph.node_count(Node(0, 0)), 2);

        graph.remove_node(Node(0, 0));
        assert!(graph.contains_node(Node(0, 0)));
        graph.remove_node(Node(0, 0));
        assert!(!graph.contains_node(Node(0, 0)));
        assert_eq!(graph, Graph::new());

        graph.remove_edge(Node(0, 0), Node(1, 1));
        assert_eq!(graph.edge_count(Node(0, 0), Node(1, 1)), 0);
    }

    #[test]
    fn test_inverse_law_on_existing_node_and_edge() {
        let graph = Shared::new(Graph::new());
        graph.with(|g| {
            g.add_node(Node(3, 3));
            g.add_edge(Node(3, 3), Node(3, 3));
        });
        let before = graph.lock().clone();

        let add_node = AddNode::new(graph.clone(), Node(3, 3));
        add_node.execute();
        add_node.rollback();
        assert_eq!(*graph.lock(), before);

        let add_edge = AddEdge::new(graph.clone(), Node(3, 3), Node(3, 3));
        add_edge.execute();
        add_edge.rollback();
        assert_eq!(*graph.lock(), before);
        assert!(graph.lock().contains_edge(Node(3, 3), Node(3, 3)));
    }

    #[test]
    fn test_descriptions() {
        let graph = Shared::new(Graph::new());
        assert_eq!(
            AddNode::new(graph.clone(), Node(1, -2)).description(),
            "add node (1, -2)"
        );
        assert_eq!(
            AddEdge::new(graph, Node(0, 0), Node(1, 1)).description(),
            "add edge (0, 0) -> (1, 1)"
        );
    }
}
