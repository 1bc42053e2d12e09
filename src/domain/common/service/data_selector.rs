use std::cmp::Ordering;

use crate::domain::common::model::{DataSelectQuery, FilterQuery, PaginateQuery};
use crate::domain::common::service::data_cell::DataCell;

/// Filtered and paginated records plus the match count before paging.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Runs filter, sort and paginate over a collection of cells.
pub struct DataSelector<T: DataCell> {
    cells: Vec<T>,
    query: DataSelectQuery,
}

impl<T: DataCell> DataSelector<T> {
    pub fn new(cells: Vec<T>, query: DataSelectQuery) -> Self {
        Self { cells, query }
    }

    pub fn select(self) -> Selection<T> {
        let mut cells = filter(self.cells, &self.query.filter);
        let total = cells.len();
        sort(&mut cells);
        let items = paginate(cells, self.query.paginate);
        Selection { items, total }
    }
}

/// Case-sensitive substring match on the name.
fn filter<T: DataCell>(cells: Vec<T>, query: &FilterQuery) -> Vec<T> {
    if query.name.is_empty() {
        return cells;
    }
    cells
        .into_iter()
        .filter(|cell| cell.name().contains(query.name.as_str()))
        .collect()
}

/// Newest first. Equal creation instants fall back to name ascending.
fn sort<T: DataCell>(cells: &mut [T]) {
    cells.sort_by(|a, b| compare(a, b));
}

fn compare<T: DataCell>(a: &T, b: &T) -> Ordering {
    b.creation()
        .cmp(&a.creation())
        .then_with(|| a.name().cmp(b.name()))
}

fn paginate<T>(cells: Vec<T>, query: PaginateQuery) -> Vec<T> {
    if query.limit <= 0 || query.page <= 0 {
        return cells;
    }

    let len = cells.len();
    let start = to_index(query.limit.saturating_mul(query.page - 1), len);
    let end = to_index(query.limit.saturating_mul(query.page), len);
    if start >= len {
        return Vec::new();
    }

    cells.into_iter().skip(start).take(end - start).collect()
}

// Clamp a non-negative offset into 0..=len
fn to_index(offset: i64, len: usize) -> usize {
    usize::try_from(offset).map_or(len, |offset| offset.min(len))
}
