use tracing::{debug, trace};

use crate::utils::move_item;

/// Owns a user-reorderable sequence and the transient state of an in-progress
/// drag gesture.
///
/// The list is content-agnostic: items are addressed by index, and the four
/// gesture operations ([`ReorderList::begin_drag`], [`ReorderList::drag_over`],
/// [`ReorderList::complete_drop`], [`ReorderList::cancel_drag`]) are plain
/// method calls carrying indices. [`ReorderUi`](crate::ReorderUi) drives them
/// from egui input, but nothing here depends on egui.
///
/// A drop that changes the order notifies the callback installed with
/// [`ReorderList::on_reorder`] exactly once, synchronously, with the full new
/// sequence.
pub struct ReorderList<T> {
    items: Vec<T>,
    /// The constructor-supplied sequence, kept so [`ReorderList::reset`] can
    /// restore it.
    initial: Vec<T>,
    dragging: Option<usize>,
    drag_over: Option<usize>,
    on_reorder: Option<Box<dyn FnMut(&[T])>>,
}

impl<T: Clone> ReorderList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            initial: items.clone(),
            items,
            dragging: None,
            drag_over: None,
            on_reorder: None,
        }
    }

    /// Restores the constructor-supplied sequence and clears any drag session.
    pub fn reset(&mut self) {
        trace!("sequence reset to initial order");
        self.items = self.initial.clone();
        self.dragging = None;
        self.drag_over = None;
    }
}

impl<T> ReorderList<T> {
    /// Installs the callback notified with the new order after each drop that
    /// actually changed the sequence.
    pub fn on_reorder(mut self, callback: impl FnMut(&[T]) + 'static) -> Self {
        self.on_reorder = Some(Box::new(callback));
        self
    }

    /// Starts a drag session for the item at `index`. A session that is
    /// already recorded is replaced.
    pub fn begin_drag(&mut self, index: usize) {
        trace!(index, "drag begun");
        self.dragging = Some(index);
        self.drag_over = None;
    }

    /// Records the insertion slot currently hovered over, in the index space
    /// of the sequence with the dragged item removed. Advisory only; calling
    /// it repeatedly with the same slot is fine.
    pub fn drag_over(&mut self, index: usize) {
        if self.drag_over != Some(index) {
            trace!(index, "drag target changed");
        }
        self.drag_over = Some(index);
    }

    /// Ends the drag session by moving the item at `source` to `target`,
    /// where `target` indexes the sequence after the removal. Returns whether
    /// the order changed.
    ///
    /// `source == target` and out-of-range indices leave the sequence
    /// untouched and fire no callback; the session is cleared either way,
    /// since the gesture is over.
    pub fn complete_drop(&mut self, source: usize, target: usize) -> bool {
        self.dragging = None;
        self.drag_over = None;

        let changed = move_item(&mut self.items, source, target);
        if changed {
            debug!(source, target, "reorder completed");
            if let Some(callback) = &mut self.on_reorder {
                callback(&self.items);
            }
        }
        changed
    }

    /// Ends the drag session without touching the sequence. This is the path
    /// for a gesture that finishes outside any valid target.
    pub fn cancel_drag(&mut self) {
        if self.dragging.is_some() {
            trace!("drag canceled");
        }
        self.dragging = None;
        self.drag_over = None;
    }

    /// Replaces the sequence wholesale, for when the upstream data changes
    /// independent of a drag gesture. The drag session and the
    /// [`ReorderList::reset`] baseline are left alone.
    pub fn set_items(&mut self, items: Vec<T>) {
        trace!(len = items.len(), "sequence replaced");
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item being dragged, if a session is active.
    pub fn dragging_index(&self) -> Option<usize> {
        self.dragging
    }

    /// Insertion slot last reported by [`ReorderList::drag_over`].
    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn drop_moves_an_element_forward() {
        let mut list = ReorderList::new(chars("abcd"));
        assert!(list.complete_drop(0, 2));
        assert_eq!(list.items(), chars("bcad"));
    }

    #[test]
    fn drop_moves_an_element_backward() {
        let mut list = ReorderList::new(chars("abcd"));
        assert!(list.complete_drop(3, 0));
        assert_eq!(list.items(), chars("dabc"));
    }

    #[test]
    fn moved_element_lands_at_target_and_the_rest_keep_their_order() {
        let base = chars("abcde");
        for source in 0..base.len() {
            for target in 0..base.len() {
                if source == target {
                    continue;
                }
                let mut list = ReorderList::new(base.clone());
                assert!(list.complete_drop(source, target));

                let result = list.items().to_vec();
                assert_eq!(result[target], base[source]);

                let mut rest = result.clone();
                rest.remove(target);
                let mut expected_rest = base.clone();
                expected_rest.remove(source);
                assert_eq!(rest, expected_rest, "drop({source}, {target})");
            }
        }
    }

    #[test]
    fn self_drop_changes_nothing_and_stays_silent() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut list =
            ReorderList::new(chars("abc")).on_reorder(move |_| *sink.borrow_mut() += 1);

        list.begin_drag(1);
        list.drag_over(1);
        assert!(!list.complete_drop(1, 1));

        assert_eq!(list.items(), chars("abc"));
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(list.dragging_index(), None);
        assert_eq!(list.drag_over_index(), None);
    }

    #[test]
    fn callback_sees_each_new_order_exactly_once() {
        let seen: Rc<RefCell<Vec<Vec<char>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut list = ReorderList::new(chars("abcd"))
            .on_reorder(move |items| sink.borrow_mut().push(items.to_vec()));

        list.complete_drop(0, 2);
        list.complete_drop(1, 1);
        list.complete_drop(3, 0);

        assert_eq!(*seen.borrow(), vec![chars("bcad"), chars("dbca")]);
    }

    #[test]
    fn canceled_drag_leaves_the_sequence_alone() {
        let mut list = ReorderList::new(chars("abc"));
        list.begin_drag(1);
        list.drag_over(2);
        assert!(list.is_dragging());

        list.cancel_drag();
        assert_eq!(list.items(), chars("abc"));
        assert_eq!(list.dragging_index(), None);
        assert_eq!(list.drag_over_index(), None);
    }

    #[test]
    fn reset_restores_the_constructor_sequence() {
        let mut list = ReorderList::new(chars("abcd"));
        list.complete_drop(0, 3);
        list.complete_drop(2, 0);
        list.begin_drag(1);

        list.reset();
        assert_eq!(list.items(), chars("abcd"));
        assert_eq!(list.dragging_index(), None);
    }

    #[test]
    fn out_of_range_drop_is_rejected_but_ends_the_session() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut list =
            ReorderList::new(chars("abc")).on_reorder(move |_| *sink.borrow_mut() += 1);

        list.begin_drag(1);
        list.drag_over(5);
        assert!(!list.complete_drop(1, 5));

        assert_eq!(list.items(), chars("abc"));
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(list.dragging_index(), None);
        assert_eq!(list.drag_over_index(), None);
    }

    #[test]
    fn set_items_replaces_order_but_not_session_or_baseline() {
        let mut list = ReorderList::new(chars("ab"));
        list.begin_drag(0);
        list.drag_over(1);

        list.set_items(chars("xyz"));
        assert_eq!(list.items(), chars("xyz"));
        assert_eq!(list.dragging_index(), Some(0));
        assert_eq!(list.drag_over_index(), Some(1));

        list.reset();
        assert_eq!(list.items(), chars("ab"));
    }

    #[test]
    fn drag_over_is_idempotent() {
        let mut list = ReorderList::new(chars("abc"));
        list.begin_drag(0);
        list.drag_over(2);
        list.drag_over(2);
        assert_eq!(list.drag_over_index(), Some(2));
        assert_eq!(list.items(), chars("abc"));
    }
}
