//! Convergence detection: group eligible tree nodes by identity and find
//! the groups whose members disagree on version.

use std::collections::{HashMap, HashSet};

use converge_core::artifact::{ArtifactCoordinate, ArtifactIdentity};
use converge_core::tree::{DependencyTree, NodeId};
use converge_util::errors::ConvergeError;

use crate::filter::ArtifactFilter;

/// Nodes sharing one logical identity that do not converge.
///
/// Members are in tree discovery order and there are always at least two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictGroup {
    identity: ArtifactIdentity,
    members: Vec<NodeId>,
}

impl ConflictGroup {
    pub fn identity(&self) -> &ArtifactIdentity {
        &self.identity
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// The first member found during traversal; names the conflict in reports.
    pub fn first(&self) -> NodeId {
        self.members[0]
    }

    /// Version of each member, in member order.
    pub fn versions<'t>(&self, tree: &'t DependencyTree) -> Vec<&'t str> {
        self.members
            .iter()
            .map(|&id| tree.node(id).version.as_str())
            .collect()
    }
}

/// Eligible nodes bucketed by identity, in first-discovery order.
#[derive(Debug, Default)]
pub struct DependencyVersionMap {
    index: HashMap<ArtifactIdentity, usize>,
    buckets: Vec<(ArtifactIdentity, Vec<NodeId>)>,
}

impl DependencyVersionMap {
    /// Walk `tree` depth-first, pre-order, collecting every eligible node.
    ///
    /// The root project is never collected. An ineligible node is pruned
    /// together with its whole subtree, so nothing below it is grouped or
    /// reported. Reaching a node twice means the input is not a tree and is
    /// reported as an error.
    pub fn collect(tree: &DependencyTree, filter: &ArtifactFilter) -> Result<Self, ConvergeError> {
        let mut map = Self::default();
        let mut visited = HashSet::new();
        let mut stack = vec![tree.root()];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(ConvergeError::Tree {
                    message: format!(
                        "dependency graph is not a tree: {} was reached twice",
                        tree.node(id)
                    ),
                });
            }
            if id != tree.root() {
                if !filter.is_eligible(tree.node(id)) {
                    continue;
                }
                map.add(tree.node(id).identity(), id);
            }
            stack.extend(tree.children(id).into_iter().rev());
        }

        Ok(map)
    }

    fn add(&mut self, identity: ArtifactIdentity, id: NodeId) {
        match self.index.get(&identity) {
            Some(&slot) => self.buckets[slot].1.push(id),
            None => {
                self.index.insert(identity.clone(), self.buckets.len());
                self.buckets.push((identity, vec![id]));
            }
        }
    }

    /// Nodes collected for `identity`, in discovery order.
    pub fn nodes(&self, identity: &ArtifactIdentity) -> &[NodeId] {
        self.index
            .get(identity)
            .map(|&slot| self.buckets[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct identities collected.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets that fail to converge under the chosen equality rule.
    pub fn conflicts(&self, tree: &DependencyTree, unique_versions: bool) -> Vec<ConflictGroup> {
        self.buckets
            .iter()
            .filter(|(_, nodes)| nodes.len() > 1 && diverges(tree, nodes, unique_versions))
            .map(|(identity, nodes)| ConflictGroup {
                identity: identity.clone(),
                members: nodes.clone(),
            })
            .collect()
    }
}

/// Non-strict: members disagree on base version. Strict: members are not all
/// the same resolved instance, i.e. exact version and ancestor chain differ.
fn diverges(tree: &DependencyTree, nodes: &[NodeId], unique_versions: bool) -> bool {
    if unique_versions {
        let instance = |id: NodeId| {
            tree.path_from_root(id)
                .into_iter()
                .map(|n| tree.node(n))
                .collect::<Vec<&ArtifactCoordinate>>()
        };
        let first = instance(nodes[0]);
        nodes[1..].iter().any(|&id| instance(id) != first)
    } else {
        let first = tree.node(nodes[0]).base_version();
        nodes[1..]
            .iter()
            .any(|&id| tree.node(id).base_version() != first)
    }
}

/// Find every identity in `tree` that does not converge.
///
/// Groups come back in the order their identity was first met during a
/// depth-first, pre-order walk, so repeated runs yield identical results.
pub fn detect(
    tree: &DependencyTree,
    filter: &ArtifactFilter,
    unique_versions: bool,
) -> Result<Vec<ConflictGroup>, ConvergeError> {
    let map = DependencyVersionMap::collect(tree, filter)?;
    let conflicts = map.conflicts(tree, unique_versions);
    tracing::debug!(
        "Checked {} artifact identities ({} nodes), {} not converging",
        map.len(),
        tree.len(),
        conflicts.len()
    );
    Ok(conflicts)
}
