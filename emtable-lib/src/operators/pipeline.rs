//! Filter, sort and paginate pipeline builder

use std::fmt;
use std::sync::Arc;

use super::FilterOverrides;
use super::SortOverrides;
use crate::error::Result;
use crate::model::Fields;
use crate::model::FilterState;
use crate::model::PageState;
use crate::model::PageVm;
use crate::model::SortState;
use crate::reactive::Item;
use crate::reactive::Stream;

/// Builds the row pipeline of a table.
///
/// Stages may be configured in any order; they are always composed as
/// filter, then sort, then paginate, so `item_count` counts the filtered
/// rows and sorting only ever sees the filtered set. Fields and overrides
/// are captured once, when the output stream is built.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{Fields, FilterState, PageState, SortState, Value};
/// use emtable_lib::operators::Pipeline;
/// use emtable_lib::reactive::{of, State};
///
/// let fields = Fields::new().field("n", |n: &i64| Value::from(*n));
/// let view = Pipeline::new(of(vec![5, 12, 7, 30]), fields)
///     .sort(of(SortState::descending("n")))
///     .filter(of(vec![FilterState::text("n", "")]))
///     .paginate(of(PageState::new(3, 1)));
///
/// let page = State::new(None);
/// let sink = page.clone();
/// let _subscription = view.subscribe(move |vm| sink.set(Some(vm.clone())));
///
/// let page = page.get().unwrap().unwrap();
/// assert_eq!(page.data, vec![30, 12, 7]);
/// assert_eq!(page.item_count, 4);
/// ```
pub struct Pipeline<T> {
    rows: Stream<Vec<T>>,
    fields: Arc<Fields<T>>,
    filters: Option<Stream<Vec<FilterState>>>,
    sort: Option<Stream<Option<SortState>>>,
    filter_overrides: FilterOverrides<T>,
    sort_overrides: SortOverrides<T>,
}

impl<T: Item> Pipeline<T> {
    /// Starts a pipeline over a stream of row collections.
    pub fn new(rows: Stream<Vec<T>>, fields: Fields<T>) -> Self {
        Self {
            rows,
            fields: Arc::new(fields),
            filters: None,
            sort: None,
            filter_overrides: FilterOverrides::new(),
            sort_overrides: SortOverrides::new(),
        }
    }

    /// Filters rows by the latest filter set.
    pub fn filter(mut self, filters: Stream<Vec<FilterState>>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Sorts rows by the latest sort state.
    ///
    /// Accepts a stream of `SortState` or `Option<SortState>`.
    pub fn sort<S>(mut self, sort: Stream<S>) -> Self
    where
        S: Item + Into<Option<SortState>>,
    {
        self.sort = Some(sort.map(|state: &S| -> Option<SortState> { state.clone().into() }));
        self
    }

    /// Replaces the built-in filter of one field.
    pub fn filter_override<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&[T], &FilterState) -> Result<Vec<T>> + Send + Sync + 'static,
    {
        self.filter_overrides.insert(field, transform);
        self
    }

    /// Replaces the built-in sort of one field.
    pub fn sort_override<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&[T], &SortState) -> Result<Vec<T>> + Send + Sync + 'static,
    {
        self.sort_overrides.insert(field, transform);
        self
    }

    /// The filtered and sorted rows, before pagination.
    pub fn rows(&self) -> Stream<Result<Vec<T>>> {
        let source = self.rows.map(|rows: &Vec<T>| -> Result<Vec<T>> { Ok(rows.clone()) });
        let filtered = super::filter(
            &source,
            self.filters.as_ref(),
            Arc::clone(&self.fields),
            Arc::new(self.filter_overrides.clone()),
        );
        match &self.sort {
            Some(sort) => super::sort(
                &filtered,
                sort,
                Arc::clone(&self.fields),
                Arc::new(self.sort_overrides.clone()),
            ),
            None => filtered,
        }
    }

    /// Finishes the pipeline with pagination.
    pub fn paginate(self, page: Stream<PageState>) -> Stream<Result<PageVm<T>>> {
        super::paginate(&self.rows(), &page)
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("fields", &self.fields)
            .field("filtered", &self.filters.is_some())
            .field("sorted", &self.sort.is_some())
            .field("filter_overrides", &self.filter_overrides)
            .field("sort_overrides", &self.sort_overrides)
            .finish()
    }
}
