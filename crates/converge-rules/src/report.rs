//! Human-readable convergence error messages.

use converge_core::tree::{DependencyTree, NodeId};

use crate::detector::ConflictGroup;

const BRANCH: &str = "└─ ";

/// Render the chain from the root down to `id`, one coordinate per line,
/// each line indented two spaces per level.
pub fn dependency_path(tree: &DependencyTree, id: NodeId) -> String {
    tree.path_from_root(id)
        .into_iter()
        .enumerate()
        .map(|(depth, node)| format!("{}{BRANCH}{}", "  ".repeat(depth), tree.node(node)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the warning for one conflict: a header naming the first member,
/// then the path to every member, separated by blank lines.
pub fn render(tree: &DependencyTree, group: &ConflictGroup) -> String {
    let mut message = format!(
        "Dependency convergence error for '{}' paths to dependency are:",
        tree.node(group.first())
    );
    for &member in group.members() {
        message.push('\n');
        message.push_str(&dependency_path(tree, member));
        message.push('\n');
    }
    message
}

/// Render every conflict, in order.
pub fn render_all(tree: &DependencyTree, groups: &[ConflictGroup]) -> Vec<String> {
    groups.iter().map(|group| render(tree, group)).collect()
}
