use super::node::Node;

/// Recovers the start-to-goal path from a tree produced by the planner.
///
/// Starts at the last entry on `goal`'s cell and follows parent ids back to
/// the root at index 0, looking each parent up among the entries inserted
/// before the child. Returns `None` if the goal is absent or a parent link
/// is dangling.
pub fn extract_path(tree: &[Node], goal: &Node) -> Option<Vec<Node>> {
    let mut current = tree.iter().rposition(|n| n == goal)?;
    let mut path = vec![tree[current]];
    while current > 0 {
        let pid = tree[current].pid;
        current = tree[..current].iter().rposition(|n| n.id == pid)?;
        path.push(tree[current]);
    }
    // A sample drawn on the goal cell leaves a zero-length final hop.
    path.dedup_by(|a, b| a.same_id(b));
    path.reverse();
    Some(path)
}

/// Sum of segment lengths along `path`.
pub fn path_cost(path: &[Node]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
