//! Scroll-parent side table.
//!
//! A tap that stops a fling scroll must not become a click. On touch start
//! the nearest scrollable ancestor of the target is remembered here, and the
//! ancestor's scroll offset is snapshotted on the ancestor itself, so any
//! touch start beneath it refreshes the snapshot. Touch end compares the
//! offset again.

use crate::host::Dom;

/// Oldest entries are evicted past this size.
const MAX_ENTRIES: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollRecord<E> {
    pub scroll_parent: E,
    pub last_scroll_top: f64,
}

#[derive(Debug)]
pub struct ScrollParentTable<E> {
    /// target -> scroll parent
    parents: Vec<(E, E)>,
    /// scroll parent -> offset at the last touch start beneath it
    offsets: Vec<(E, f64)>,
}

impl<E> Default for ScrollParentTable<E> {
    fn default() -> Self {
        Self {
            parents: Vec::new(),
            offsets: Vec::new(),
        }
    }
}

fn upsert<K: PartialEq, V>(entries: &mut Vec<(K, V)>, key: K, value: V) {
    if let Some(slot) = entries.iter_mut().find(|(existing, _)| *existing == key) {
        slot.1 = value;
        return;
    }
    if entries.len() == MAX_ENTRIES {
        entries.remove(0);
    }
    entries.push((key, value));
}

impl<E: Clone + PartialEq> ScrollParentTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of targets with a known scroll parent.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn scroll_parent(&self, target: &E) -> Option<&E> {
        self.parents
            .iter()
            .find(|(key, _)| key == target)
            .map(|(_, parent)| parent)
    }

    pub fn last_scroll_top(&self, scroll_parent: &E) -> Option<f64> {
        self.offsets
            .iter()
            .find(|(key, _)| key == scroll_parent)
            .map(|(_, top)| *top)
    }

    /// The scroll parent of `target` together with the parent's snapshot.
    pub fn get(&self, target: &E) -> Option<ScrollRecord<E>> {
        let scroll_parent = self.scroll_parent(target)?.clone();
        let last_scroll_top = self.last_scroll_top(&scroll_parent)?;
        Some(ScrollRecord {
            scroll_parent,
            last_scroll_top,
        })
    }

    pub fn insert(&mut self, target: E, record: ScrollRecord<E>) {
        upsert(
            &mut self.offsets,
            record.scroll_parent.clone(),
            record.last_scroll_top,
        );
        upsert(&mut self.parents, target, record.scroll_parent);
    }

    /// Forgets the scroll parent of `target`. Offsets stay with their parent.
    pub fn remove(&mut self, target: &E) {
        self.parents.retain(|(key, _)| key != target);
    }

    pub fn clear(&mut self) {
        self.parents.clear();
        self.offsets.clear();
    }

    /// Re-resolves the scroll parent of `target` when the cached one no
    /// longer contains it, then snapshots the parent's scroll offset.
    pub fn update<D>(&mut self, dom: &D, target: &E)
    where
        D: Dom<Element = E>,
    {
        let cached = self
            .scroll_parent(target)
            .cloned()
            .filter(|parent| dom.contains(parent, target));

        match cached.or_else(|| find_scroll_parent(dom, target)) {
            Some(scroll_parent) => {
                let last_scroll_top = dom.scroll_metrics(&scroll_parent).scroll_top;
                self.insert(
                    target.clone(),
                    ScrollRecord {
                        scroll_parent,
                        last_scroll_top,
                    },
                );
            }
            None => self.remove(target),
        }
    }

    /// Gives `to` the scroll parent of `from`, or none if `from` has none.
    pub fn inherit(&mut self, from: &E, to: &E) {
        if from == to {
            return;
        }
        match self.scroll_parent(from).cloned() {
            Some(parent) => upsert(&mut self.parents, to.clone(), parent),
            None => self.remove(to),
        }
    }

    /// Whether the scroll parent of `target` moved since the last touch
    /// start beneath it.
    pub fn scrolled_since_update<D>(&self, dom: &D, target: &E) -> bool
    where
        D: Dom<Element = E>,
    {
        self.get(target).is_some_and(|record| {
            dom.scroll_metrics(&record.scroll_parent).scroll_top != record.last_scroll_top
        })
    }
}

/// Walks from `element` (inclusive) up to the first element whose content
/// overflows its box.
pub fn find_scroll_parent<D: Dom>(dom: &D, element: &D::Element) -> Option<D::Element> {
    let mut current = Some(element.clone());
    while let Some(candidate) = current {
        if dom.scroll_metrics(&candidate).is_scrollable() {
            return Some(candidate);
        }
        current = dom.parent_element(&candidate);
    }
    None
}

#[cfg(test)]
#[path = "tests/scroll_parent_tests.rs"]
mod tests;
