//! The "new product" form keeps a bounded, ordered list of compressed files
//! with one of them shown in the large preview.

/// Append freshly compressed files, keeping at most `max` in total.
pub fn merge_selection<T>(existing: Vec<T>, picked: impl IntoIterator<Item = T>, max: usize) -> Vec<T> {
    let mut merged = existing;
    merged.extend(picked);
    merged.truncate(max);
    merged
}

/// Remove file `index` and return the new active preview index.
///
/// Removing the active file jumps back to the first one; removing an earlier
/// file shifts the active index down. Out-of-range indices change nothing.
pub fn remove_selected<T>(files: &mut Vec<T>, active: usize, index: usize) -> usize {
    if index >= files.len() {
        return active;
    }
    files.remove(index);

    let active = if index == active {
        0
    } else if index < active {
        active - 1
    } else {
        active
    };
    clamp_active(active, files.len())
}

/// Keep the preview index inside a list of `len` files.
pub fn clamp_active(active: usize, len: usize) -> usize {
    active.min(len.saturating_sub(1))
}
