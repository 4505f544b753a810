//! Data table facade wiring rows, state and headers together

use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::config::TableConfig;
use crate::error::Result;
use crate::header::HeaderRow;
use crate::model::Fields;
use crate::model::FilterState;
use crate::model::HeaderConfig;
use crate::model::HeaderState;
use crate::model::PageState;
use crate::model::PageVm;
use crate::model::SortDirection;
use crate::model::SortState;
use crate::operators::Pipeline;
use crate::reactive::Item;
use crate::reactive::State;
use crate::reactive::Stream;
use crate::reactive::Subscription;

/// A complete table: rows, externally driven state, headers and the paged
/// view.
///
/// Header change events are written back into the table's sort and filter
/// state the way a hosting application would, and a filter change returns
/// to the first page. Because the header row only reports user edits, the
/// write-back settles after one round.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{Fields, HeaderConfig, SortDirection, Value};
/// use emtable_lib::reactive::State;
/// use emtable_lib::{DataTable, TableConfig};
///
/// let fields = Fields::new().field("n", |n: &i64| Value::from(*n));
/// let columns = vec![HeaderConfig::new("n", "N").sortable()];
/// let table = DataTable::new(vec![3, 1, 2], fields, columns, &TableConfig::default());
///
/// let latest = State::new(Vec::new());
/// let sink = latest.clone();
/// let _subscription = table.page().subscribe(move |page| {
///     if let Ok(page) = page {
///         sink.set(page.data.clone());
///     }
/// });
///
/// table.sort_edit("n", SortDirection::Descending);
/// assert_eq!(latest.get(), vec![3, 2, 1]);
/// ```
pub struct DataTable<T> {
    rows: State<Vec<T>>,
    filters: State<Vec<FilterState>>,
    sort: State<Option<SortState>>,
    page: State<PageState>,
    header: HeaderRow,
    view: Stream<Result<PageVm<T>>>,
    subscriptions: Mutex<Subscription>,
}

fn lock(subscription: &Mutex<Subscription>) -> MutexGuard<'_, Subscription> {
    subscription.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Item> DataTable<T> {
    /// Creates a table with the built-in filter and sort transforms.
    pub fn new(rows: Vec<T>, fields: Fields<T>, columns: Vec<HeaderConfig>, config: &TableConfig) -> Self {
        Self::with_pipeline(rows, fields, columns, config, |pipeline| pipeline)
    }

    /// Creates a table, letting `customize` register overrides on the
    /// pipeline before it is built.
    pub fn with_pipeline<F>(
        rows: Vec<T>,
        fields: Fields<T>,
        columns: Vec<HeaderConfig>,
        config: &TableConfig,
        customize: F,
    ) -> Self
    where
        F: FnOnce(Pipeline<T>) -> Pipeline<T>,
    {
        let rows = State::new(rows);
        let filters = State::new(Vec::new());
        let sort = State::new(config.default_sort.clone());
        let page = State::new(config.initial_page());

        let header = HeaderRow::new(columns, config.quiet_period);
        header.bind_sort(&sort.stream());
        header.bind_filters(&filters.stream());

        let view = customize(Pipeline::new(rows.stream(), fields))
            .filter(filters.stream())
            .sort(sort.stream())
            .paginate(page.stream());

        let mut subscriptions = Subscription::empty();

        let sort_target = sort.clone();
        subscriptions.add(header.sort_changes().subscribe(move |change| {
            log::debug!("[table] Applying header sort on '{}'", change.field_id);
            sort_target.set(Some(change.clone()));
        }));

        let filters_target = filters.clone();
        let page_target = page.clone();
        subscriptions.add(header.filters_changes().subscribe(move |change| {
            log::debug!("[table] Applying {} header filters, back to page 1", change.len());
            filters_target.set(change.clone());
            page_target.update(|page| page.page_number = 1);
        }));

        Self {
            rows,
            filters,
            sort,
            page,
            header,
            view,
            subscriptions: Mutex::new(subscriptions),
        }
    }

    /// The paged view, recomputed on every row, filter, sort or page
    /// change.
    pub fn page(&self) -> Stream<Result<PageVm<T>>> {
        self.view.clone()
    }

    /// Per-column header state.
    pub fn headers(&self) -> Stream<Vec<HeaderState>> {
        self.header.header_states()
    }

    /// The header synchronizer of this table.
    pub fn header(&self) -> &HeaderRow {
        &self.header
    }

    /// Replaces the rows.
    pub fn set_rows(&self, rows: Vec<T>) {
        self.rows.set(rows);
    }

    /// Replaces the filter set programmatically; pending header edits are
    /// discarded.
    pub fn set_filters(&self, filters: Vec<FilterState>) {
        self.filters.set(filters);
    }

    /// Replaces the sort programmatically.
    pub fn set_sort(&self, sort: Option<SortState>) {
        self.sort.set(sort);
    }

    /// Moves to another page of the same size.
    pub fn set_page_number(&self, page_number: usize) {
        self.page.update(|page| page.page_number = page_number);
    }

    /// Sort edit coming from a column header.
    pub fn sort_edit(&self, field_id: impl Into<String>, direction: SortDirection) {
        self.header.sort_edit(field_id, direction);
    }

    /// Filter edit coming from a column header.
    pub fn filter_edit(&self, filter: FilterState) {
        self.header.filter_edit(filter);
    }

    /// Clears every header filter.
    pub fn clear_filters(&self) {
        self.header.clear_all();
    }

    /// Filters currently applied to the rows.
    pub fn filters(&self) -> Vec<FilterState> {
        self.filters.get()
    }

    /// Sort currently applied to the rows, if any.
    pub fn sort(&self) -> Option<SortState> {
        self.sort.get()
    }

    /// Current page number and size.
    pub fn page_state(&self) -> PageState {
        self.page.get()
    }

    /// Detaches every internal subscription.
    pub fn dispose(&self) {
        lock(&self.subscriptions).unsubscribe();
        self.header.dispose();
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable").field("header", &self.header).finish_non_exhaustive()
    }
}
