/// Nearest-point search over sorted x values.
///
/// Bisects for the insertion index, then compares the two neighboring
/// points' distances to the query. Exact ties resolve to the later index.
/// Empty input yields no selection rather than indexing out of bounds.
#[must_use]
pub fn nearest_index(sorted_xs: &[f64], target: f64) -> Option<usize> {
    if sorted_xs.is_empty() {
        return None;
    }

    let insertion = sorted_xs
        .partition_point(|&x| x < target)
        .clamp(1, sorted_xs.len());
    let lower = insertion - 1;
    if insertion == sorted_xs.len() {
        return Some(lower);
    }

    let lower_distance = target - sorted_xs[lower];
    let upper_distance = sorted_xs[insertion] - target;
    if lower_distance >= upper_distance {
        Some(insertion)
    } else {
        Some(lower)
    }
}
