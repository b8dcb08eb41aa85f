/// Removes the element at `source` and reinserts it at `target`, where
/// `target` is an index into the sequence as it looks after the removal.
/// Returns whether the order changed. Does nothing if `source` equals
/// `target` or if either index is outside the sequence bounds.
pub fn move_item<T>(items: &mut Vec<T>, source: usize, target: usize) -> bool {
    if source == target || source >= items.len() || target >= items.len() {
        return false;
    }

    let item = items.remove(source);
    items.insert(target, item);
    true
}

#[cfg(test)]
mod tests {
    use super::move_item;

    #[test]
    fn moves_within_bounds() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 0, 2));
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
    }

    #[test]
    fn target_is_an_index_into_the_shortened_sequence() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 3, 0));
        assert_eq!(items, vec!['d', 'a', 'b', 'c']);

        // max target appends after the last remaining element
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 0, 3));
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);
    }

    #[test]
    fn equal_indices_leave_the_sequence_alone() {
        let mut items = vec!['a', 'b', 'c'];
        assert!(!move_item(&mut items, 1, 1));
        assert_eq!(items, vec!['a', 'b', 'c']);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut items = vec!['a', 'b', 'c'];
        assert!(!move_item(&mut items, 3, 0));
        assert!(!move_item(&mut items, 0, 3));
        assert_eq!(items, vec!['a', 'b', 'c']);

        let mut empty: Vec<char> = Vec::new();
        assert!(!move_item(&mut empty, 0, 0));
    }
}
