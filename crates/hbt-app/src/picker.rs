// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Searchable, scrollable grid shared by the category and emoji pickers.
//!
//! Items are laid out row-major with a fixed column count; only
//! `visible_rows` rows are shown at a time. The selection indexes the
//! *filtered* list, with [`Selection::None`] standing for the "(none)" option
//! that sits above the first row.

use std::ops::Range;

use crate::{Category, Emoji};

pub trait PickerItem {
    /// Text matched against the search buffer.
    fn keywords(&self) -> &str;
}

impl PickerItem for Emoji {
    fn keywords(&self) -> &str {
        self.keywords
    }
}

impl PickerItem for Category {
    fn keywords(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Item(usize),
}

impl Selection {
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Item(index) => Some(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub visible_rows: usize,
}

impl GridLayout {
    pub const EMOJI_GRID: Self = Self {
        columns: 8,
        visible_rows: 8,
    };
    pub const CATEGORY_LIST: Self = Self {
        columns: 1,
        visible_rows: 6,
    };

    pub fn total_rows(self, len: usize) -> usize {
        len.div_ceil(self.columns.max(1))
    }

    pub fn max_scroll(self, len: usize) -> usize {
        self.total_rows(len).saturating_sub(self.visible_rows)
    }

    /// `(row, column)` of a filtered index.
    pub fn cell(self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (index / columns, index % columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerNav {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

pub fn filter<'a, T: PickerItem>(items: &'a [T], search: &str) -> Vec<&'a T> {
    filter_indices(items, search)
        .into_iter()
        .map(|index| &items[index])
        .collect()
}

fn filter_indices<T: PickerItem>(items: &[T], search: &str) -> Vec<usize> {
    let needle = search.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| needle.is_empty() || item.keywords().to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// Scroll offset that keeps the selected row inside the window, clamped to
/// `[0, max_scroll]`.
pub fn reconcile_scroll(
    selection: Selection,
    filtered_len: usize,
    scroll: usize,
    layout: GridLayout,
) -> usize {
    let Selection::Item(index) = selection else {
        return 0;
    };

    let (row, _) = layout.cell(index);
    let mut next = scroll;
    if row < next {
        next = row;
    } else if row >= next + layout.visible_rows {
        next = (row + 1).saturating_sub(layout.visible_rows);
    }
    next.min(layout.max_scroll(filtered_len))
}

/// One navigation step. Never wraps; `Up` from the first row and `Left` from
/// index 0 land on [`Selection::None`].
pub fn step(selection: Selection, nav: PickerNav, len: usize, layout: GridLayout) -> Selection {
    if len == 0 {
        return Selection::None;
    }
    let last = len - 1;
    let columns = layout.columns.max(1);

    match (nav, selection) {
        (PickerNav::Left, Selection::None) => Selection::None,
        (PickerNav::Left, Selection::Item(0)) => Selection::None,
        (PickerNav::Left, Selection::Item(index)) => Selection::Item(index.min(last + 1) - 1),
        (PickerNav::Right, Selection::None) => Selection::Item(0),
        (PickerNav::Right, Selection::Item(index)) => Selection::Item((index + 1).min(last)),
        (PickerNav::Up, Selection::None) => Selection::None,
        (PickerNav::Up, Selection::Item(index)) if index < columns => Selection::None,
        (PickerNav::Up, Selection::Item(index)) => Selection::Item((index - columns).min(last)),
        (PickerNav::Down, Selection::None) => Selection::Item(0),
        (PickerNav::Down, Selection::Item(index)) => Selection::Item((index + columns).min(last)),
        (PickerNav::PageUp, _) => {
            (0..layout.visible_rows.max(1)).fold(selection, |current, _| {
                step(current, PickerNav::Up, len, layout)
            })
        }
        (PickerNav::PageDown, _) => {
            (0..layout.visible_rows.max(1)).fold(selection, |current, _| {
                step(current, PickerNav::Down, len, layout)
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker<T> {
    items: Vec<T>,
    filtered: Vec<usize>,
    search: String,
    selection: Selection,
    scroll: usize,
    layout: GridLayout,
}

impl<T: PickerItem> Picker<T> {
    pub fn new(items: Vec<T>, layout: GridLayout) -> Self {
        let filtered = (0..items.len()).collect();
        Self {
            items,
            filtered,
            search: String::new(),
            selection: Selection::None,
            scroll: 0,
            layout,
        }
    }

    /// Pre-selects the first item matching `predicate`, scrolling it into view.
    pub fn with_selected(mut self, predicate: impl Fn(&T) -> bool) -> Self {
        self.selection = self
            .filtered
            .iter()
            .position(|index| predicate(&self.items[*index]))
            .map_or(Selection::None, Selection::Item);
        self.reconcile();
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &T> {
        self.filtered.iter().map(|index| &self.items[*index])
    }

    pub fn selected(&self) -> Option<&T> {
        let index = self.selection.index()?;
        self.filtered.get(index).map(|item| &self.items[*item])
    }

    pub fn push_char(&mut self, ch: char) {
        self.search.push(ch);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.search.pop().is_some() {
            self.refilter();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refilter();
    }

    pub fn navigate(&mut self, nav: PickerNav) {
        self.selection = step(self.selection, nav, self.filtered.len(), self.layout);
        self.reconcile();
    }

    pub fn total_rows(&self) -> usize {
        self.layout.total_rows(self.filtered.len())
    }

    /// Rows currently inside the window.
    pub fn visible_rows(&self) -> Range<usize> {
        let end = (self.scroll + self.layout.visible_rows).min(self.total_rows());
        self.scroll.min(end)..end
    }

    pub fn has_more_above(&self) -> bool {
        self.scroll > 0
    }

    pub fn has_more_below(&self) -> bool {
        self.visible_rows().end < self.total_rows()
    }

    /// Filtered items of one grid row, paired with their filtered index.
    pub fn row(&self, row: usize) -> Vec<(usize, &T)> {
        let columns = self.layout.columns.max(1);
        let start = row * columns;
        let end = (start + columns).min(self.filtered.len());
        (start..end)
            .map(|index| (index, &self.items[self.filtered[index]]))
            .collect()
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.items, &self.search);
        if let Selection::Item(index) = self.selection
            && index >= self.filtered.len()
        {
            self.selection = Selection::None;
        }
        self.reconcile();
    }

    fn reconcile(&mut self) {
        self.scroll = reconcile_scroll(
            self.selection,
            self.filtered.len(),
            self.scroll,
            self.layout,
        );
    }
}
