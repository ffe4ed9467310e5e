use super::SearchTable;

/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered node indices from start to goal, or None when the
/// predecessor chain does not lead back to start
/// table: SearchTable - predecessor and distance per node index
pub(crate) fn reconstruct_path(table: &SearchTable, start: usize, goal: usize) -> Option<Vec<usize>> {

    let mut path = Vec::new();
    let mut current = Some(goal);

    // Trace back from goal to start
    // A chain longer than the table means the predecessors loop
    while let Some(index) = current {
        if path.len() >= table.len() {
            return None;
        }
        path.push(index);
        current = table.get(index)?.0;
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    // Unreached goals walk back to themselves, not to start
    if path.first() != Some(&start) {
        return None;
    }

    Some(path)
}
