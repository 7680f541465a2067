use super::node::Node;
use super::obstacle::ObstacleList;

/// Finds the tree node closest to `candidate` that it may connect to.
///
/// A tree node qualifies when it is within `threshold`, has a different id
/// from the candidate, is not already a child of the candidate's id, and the
/// straight segment between them is obstacle-free. The first node at the
/// smallest distance wins.
///
/// On success the candidate is re-parented onto the returned node and its
/// cost set to the parent's cost plus the distance. `None` leaves the
/// candidate untouched.
pub fn find_nearest(
    tree: &[Node],
    candidate: &mut Node,
    obstacles: &ObstacleList,
    threshold: f64,
) -> Option<Node> {
    let mut best: Option<(f64, &Node)> = None;
    for node in tree {
        let distance = node.distance(candidate);
        if distance > threshold {
            continue;
        }
        if node.same_id(candidate) {
            continue;
        }
        // A tree node whose parent id is the candidate's id would let the
        // candidate become the parent of its own parent.
        if node.pid == candidate.id {
            continue;
        }
        if best.is_some_and(|(best_distance, _)| distance >= best_distance) {
            continue;
        }
        if obstacles.blocks(node, candidate) {
            continue;
        }
        best = Some((distance, node));
    }

    let (distance, nearest) = best?;
    candidate.pid = nearest.id;
    candidate.cost = nearest.cost + distance;
    Some(*nearest)
}
