//! Resolved dependency tree, stored as an arena of coordinates.

use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use converge_util::errors::{ConvergeError, ConvergeResult};

use crate::artifact::{ArtifactCoordinate, Scope};

/// Handle to a node inside a [`DependencyTree`].
pub type NodeId = NodeIndex;

/// A resolved dependency tree rooted at the project itself.
///
/// Nodes live in a petgraph arena; an edge always points from a parent to
/// one of its children, so the parent link of a node is its single
/// incoming edge. Nodes can only be added under an existing parent, which
/// keeps the graph a tree.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    graph: DiGraph<ArtifactCoordinate, ()>,
    root: NodeIndex,
}

impl DependencyTree {
    /// Create a tree holding only the project node.
    pub fn new(root: ArtifactCoordinate) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a child under `parent`, after any existing children.
    pub fn add_child(&mut self, parent: NodeId, coordinate: ArtifactCoordinate) -> NodeId {
        let child = self.graph.add_node(coordinate);
        self.graph.add_edge(parent, child, ());
        child
    }

    /// Get the coordinate stored at a node.
    pub fn node(&self, id: NodeId) -> &ArtifactCoordinate {
        &self.graph[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.graph.neighbors_directed(id, Direction::Incoming).next()
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        // petgraph lists neighbors most recently added first.
        let mut children: Vec<NodeId> = self
            .graph
            .neighbors_directed(id, Direction::Outgoing)
            .collect();
        children.reverse();
        children
    }

    /// The chain of nodes from the root down to `id`, both inclusive.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Distance from the root (the root is at depth 0).
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_from_root(id).len() - 1
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// `true` when the project has no dependencies.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Render the tree, one node per line, children indented under their
    /// parent. Nodes deeper than `max_depth` are left out.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            output.push_str(&format!("{}└─ {}\n", "  ".repeat(depth), self.node(id)));
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for child in self.children(id).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        output
    }

    /// Load a tree from a JSON file.
    pub fn from_path(path: &Path) -> ConvergeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvergeError::Tree {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// Parse a tree from its JSON form.
    pub fn from_json(content: &str) -> Result<Self, ConvergeError> {
        let spec: NodeSpec = serde_json::from_str(content).map_err(|e| ConvergeError::Tree {
            message: format!("Failed to parse dependency tree: {e}"),
        })?;

        let mut tree = Self::new(spec.coordinate());
        let mut pending: Vec<(NodeId, &NodeSpec)> = vec![(tree.root, &spec)];
        while let Some((id, node)) = pending.pop() {
            for child in &node.dependencies {
                let child_id = tree.add_child(id, child.coordinate());
                pending.push((child_id, child));
            }
        }
        Ok(tree)
    }

    /// Serialize the tree back into its JSON form.
    pub fn to_json(&self) -> Result<String, ConvergeError> {
        serde_json::to_string_pretty(&self.spec_of(self.root)).map_err(|e| {
            ConvergeError::Generic {
                message: format!("Failed to serialize dependency tree: {e}"),
            }
        })
    }

    fn spec_of(&self, id: NodeId) -> NodeSpec {
        let c = self.node(id);
        NodeSpec {
            group: c.group_id.clone(),
            artifact: c.artifact_id.clone(),
            version: c.version.clone(),
            kind: c.kind.clone(),
            classifier: c.classifier.clone(),
            scope: c.scope,
            optional: c.optional,
            dependencies: self
                .children(id)
                .into_iter()
                .map(|child| self.spec_of(child))
                .collect(),
        }
    }
}

/// On-disk shape of one tree node.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeSpec {
    group: String,
    artifact: String,
    version: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<Scope>,
    #[serde(default)]
    optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<NodeSpec>,
}

fn default_kind() -> String {
    "jar".to_string()
}

impl NodeSpec {
    fn coordinate(&self) -> ArtifactCoordinate {
        ArtifactCoordinate {
            group_id: self.group.clone(),
            artifact_id: self.artifact.clone(),
            version: self.version.clone(),
            classifier: self.classifier.clone(),
            kind: self.kind.clone(),
            scope: self.scope,
            optional: self.optional,
        }
    }
}
