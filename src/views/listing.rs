//! In-memory list state shared by every listing screen.
//!
//! A [`ListView`] owns the collection exactly as fetched and keeps a derived
//! index of the rows that pass the current search text and filter, in the
//! current sort order. The derived index is rebuilt synchronously on every
//! change, so readers never see a stale view.

use std::cmp::Ordering;

use crate::utils::text::{contains_folded, search_needle};

/// Per-entity listing rules.
pub trait ListSpec {
    type Item;
    type Filter: Clone + Default + PartialEq;
    type Sort: Copy + Default + PartialEq;

    /// Fields the free-text search looks at. Missing fields never match.
    fn search_fields(item: &Self::Item) -> Vec<Option<&str>>;

    fn matches_filter(_item: &Self::Item, _filter: &Self::Filter) -> bool {
        true
    }

    fn compare(_a: &Self::Item, _b: &Self::Item, _sort: Self::Sort) -> Ordering {
        Ordering::Equal
    }
}

pub struct ListView<S: ListSpec> {
    items: Vec<S::Item>,
    search: String,
    filter: S::Filter,
    sort: S::Sort,
    visible: Vec<usize>,
}

impl<S: ListSpec> Default for ListView<S> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            filter: S::Filter::default(),
            sort: S::Sort::default(),
            visible: Vec::new(),
        }
    }
}

impl<S: ListSpec> ListView<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&mut self, items: Vec<S::Item>) {
        self.items = items;
        self.recompute();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: S::Filter) {
        self.filter = filter;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: S::Sort) {
        self.sort = sort;
        self.recompute();
    }

    /// Mutate the source collection in place, then rebuild the view.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Vec<S::Item>),
    {
        f(&mut self.items);
        self.recompute();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> &S::Filter {
        &self.filter
    }

    pub fn sort(&self) -> S::Sort {
        self.sort
    }

    /// The full source collection, in fetch order.
    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn visible(&self) -> impl Iterator<Item = &S::Item> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        let needle = search_needle(&self.search);
        let mut visible: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                needle.as_deref().map_or(true, |needle| {
                    S::search_fields(item)
                        .into_iter()
                        .any(|field| contains_folded(field, needle))
                })
            })
            .filter(|(_, item)| S::matches_filter(item, &self.filter))
            .map(|(i, _)| i)
            .collect();

        let items = &self.items;
        let sort = self.sort;
        visible.sort_by(|&a, &b| S::compare(&items[a], &items[b], sort));
        self.visible = visible;
    }
}
