//! Handler for `converge tree`.

use std::path::Path;

use converge_core::tree::DependencyTree;
use converge_util::errors::ConvergeResult;

pub fn exec(path: &Path, depth: Option<u32>) -> ConvergeResult<()> {
    let tree = DependencyTree::from_path(path)?;
    print!("{}", tree.print_tree(depth.map(|d| d as usize)));
    Ok(())
}
