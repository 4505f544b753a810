//! Header state synchronizer
//!
//! Reconciles programmatic sort/filter state with edits made through the
//! column headers, and derives the per-column [`HeaderState`] list.
//!
//! Outward change events only ever originate from header edits. A host that
//! answers a change event by updating the programmatic state therefore does
//! not trigger another change event, which breaks the loop
//! external update -> recompute -> change event -> external update.

use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use crate::model::FilterState;
use crate::model::HeaderConfig;
use crate::model::HeaderState;
use crate::model::SortDirection;
use crate::model::SortState;
use crate::reactive::State;
use crate::reactive::Stream;
use crate::reactive::Subject;
use crate::reactive::Subscription;
use crate::reactive::combine_latest3;
use crate::reactive::merge;

/// Header synchronizer of one table.
///
/// Inputs are the column configuration, the externally driven sort and the
/// externally driven filter set (each settable directly or bound to a
/// stream), plus single sort and filter edits coming from the column
/// headers.
///
/// - The effective sort is whichever of external sort and sort edit arrived
///   last.
/// - The effective filter set folds filter edits by field on top of the
///   external set; a new external set discards the accumulated edits.
///   Inactive entries are pruned.
/// - [`sort_changes`](HeaderRow::sort_changes) fires on every sort edit;
///   [`filters_changes`](HeaderRow::filters_changes) fires once the filter
///   edits went quiet for the configured period, carrying the effective
///   filter set at that time.
///
/// Dropping the row (or calling [`dispose`](HeaderRow::dispose)) detaches it
/// from every bound stream.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use emtable_lib::header::HeaderRow;
/// use emtable_lib::model::{FilterState, HeaderConfig};
///
/// let row = HeaderRow::new(vec![HeaderConfig::new("name", "Name")], Duration::from_millis(10));
/// row.set_filters(vec![FilterState::text("name", "a")]);
/// row.filter_edit(FilterState::text("name", "b"));
/// assert_eq!(row.current_filters(), vec![FilterState::text("name", "b")]);
///
/// // a new external set discards the edit
/// row.set_filters(vec![FilterState::text("name", "c")]);
/// assert_eq!(row.current_filters(), vec![FilterState::text("name", "c")]);
/// ```
pub struct HeaderRow {
    configs: State<Vec<HeaderConfig>>,
    sort: State<Option<SortState>>,
    filters: State<Vec<FilterState>>,
    sort_edits: Subject<SortState>,
    filter_edits: Subject<FilterState>,
    applied_filter_edits: Subject<FilterState>,
    effective_sort: State<Option<SortState>>,
    effective_filters: State<Vec<FilterState>>,
    quiet_period: Duration,
    subscriptions: Mutex<Subscription>,
}

fn lock(subscription: &Mutex<Subscription>) -> MutexGuard<'_, Subscription> {
    subscription.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HeaderRow {
    /// Creates a row for `configs`; filter changes are emitted after
    /// `quiet_period` without further filter edits.
    pub fn new(configs: Vec<HeaderConfig>, quiet_period: Duration) -> Self {
        let row = Self {
            configs: State::new(configs),
            sort: State::new(None),
            filters: State::new(Vec::new()),
            sort_edits: Subject::new(),
            filter_edits: Subject::new(),
            applied_filter_edits: Subject::new(),
            effective_sort: State::new(None),
            effective_filters: State::new(Vec::new()),
            quiet_period,
            subscriptions: Mutex::new(Subscription::empty()),
        };
        row.connect();
        row
    }

    fn connect(&self) {
        let effective_sort = self.effective_sort.clone();
        let sort = merge([self.sort.stream(), self.sort_edits.stream().map(|edit| Some(edit.clone()))])
            .subscribe(move |sort| effective_sort.set(sort.clone()));

        let edits = self.filter_edits.stream();
        let effective_filters = self.effective_filters.clone();
        let filters = self
            .filters
            .stream()
            .switch_map(move |external: &Vec<FilterState>| {
                log::debug!(
                    "[header] External filter set replaced ({} entries), edits reset",
                    external.len()
                );
                let external = external.clone();
                edits
                    .scan(Vec::new(), |edited: &Vec<FilterState>, edit| fold_edit(edited, edit))
                    .start_with(Vec::new())
                    .map(move |edited: &Vec<FilterState>| reconcile(&external, edited))
            })
            .subscribe(move |filters| effective_filters.set(filters.clone()));

        let mut subscriptions = lock(&self.subscriptions);
        subscriptions.add(sort);
        subscriptions.add(filters);
    }

    /// Replaces the column configuration.
    pub fn set_configs(&self, configs: Vec<HeaderConfig>) {
        self.configs.set(configs);
    }

    /// Replaces the externally driven sort.
    pub fn set_sort(&self, sort: Option<SortState>) {
        self.sort.set(sort);
    }

    /// Replaces the externally driven filter set, discarding pending header
    /// edits.
    pub fn set_filters(&self, filters: Vec<FilterState>) {
        self.filters.set(filters);
    }

    /// Follows `configs` until the row is disposed.
    pub fn bind_configs(&self, configs: &Stream<Vec<HeaderConfig>>) {
        let target = self.configs.clone();
        self.bind(configs.subscribe(move |configs| target.set(configs.clone())));
    }

    /// Follows an external sort stream until the row is disposed.
    pub fn bind_sort(&self, sort: &Stream<Option<SortState>>) {
        let target = self.sort.clone();
        self.bind(sort.subscribe(move |sort| target.set(sort.clone())));
    }

    /// Follows an external filter stream until the row is disposed.
    pub fn bind_filters(&self, filters: &Stream<Vec<FilterState>>) {
        let target = self.filters.clone();
        self.bind(filters.subscribe(move |filters| target.set(filters.clone())));
    }

    fn bind(&self, subscription: Subscription) {
        lock(&self.subscriptions).add(subscription);
    }

    /// Records a sort edit made through a column header.
    pub fn sort_edit(&self, field_id: impl Into<String>, direction: SortDirection) {
        let edit = SortState::new(field_id, direction);
        log::debug!("[header] Sort edit on '{}': {:?}", edit.field_id, edit.direction);
        self.sort_edits.emit(edit);
    }

    /// Records a filter edit made through a column header.
    pub fn filter_edit(&self, filter: FilterState) {
        log::debug!(
            "[header] Filter edit on '{}' ({})",
            filter.field_id(),
            if filter.has_value() { "active" } else { "empty" }
        );
        self.filter_edits.emit(filter.clone());
        // the effective set already includes the edit here
        self.applied_filter_edits.emit(filter);
    }

    /// Clears the filter of every filterable column.
    ///
    /// The edits arrive within one quiet period, so they produce a single
    /// filter change.
    pub fn clear_all(&self) {
        for config in self.configs.get() {
            if let Some(filter) = &config.filter {
                self.filter_edit(FilterState::empty(filter.kind, config.id.as_str()));
            }
        }
    }

    /// The current column configuration.
    pub fn configs(&self) -> Vec<HeaderConfig> {
        self.configs.get()
    }

    /// The current effective filter set.
    pub fn current_filters(&self) -> Vec<FilterState> {
        self.effective_filters.get()
    }

    /// The current effective sort.
    pub fn current_sort(&self) -> Option<SortState> {
        self.effective_sort.get()
    }

    /// Per-column header state, recomputed on any configuration, sort or
    /// filter change.
    pub fn header_states(&self) -> Stream<Vec<HeaderState>> {
        combine_latest3(
            &self.configs.stream(),
            &self.effective_sort.stream(),
            &self.effective_filters.stream(),
        )
        .map(|(configs, sort, filters)| {
            configs
                .iter()
                .map(|config| HeaderState::overlay(config, sort.as_ref(), filters))
                .collect()
        })
    }

    /// The effective sort, current value first.
    pub fn effective_sort(&self) -> Stream<Option<SortState>> {
        self.effective_sort.stream()
    }

    /// The effective filter set, current value first.
    pub fn effective_filters(&self) -> Stream<Vec<FilterState>> {
        self.effective_filters.stream()
    }

    /// Every sort edit, as it happens.
    pub fn sort_changes(&self) -> Stream<SortState> {
        self.sort_edits.stream()
    }

    /// The effective filter set, once filter edits went quiet.
    ///
    /// Needs a Tokio runtime for the quiet period; without one every edit
    /// produces a change immediately.
    pub fn filters_changes(&self) -> Stream<Vec<FilterState>> {
        self.applied_filter_edits
            .stream()
            .debounce(self.quiet_period)
            .with_latest_from(&self.effective_filters.stream())
            .map(|(_, filters)| {
                log::debug!("[header] Emitting filter change with {} entries", filters.len());
                filters.clone()
            })
    }

    /// Detaches the row from every stream it follows.
    pub fn dispose(&self) {
        lock(&self.subscriptions).unsubscribe();
    }
}

impl fmt::Debug for HeaderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderRow")
            .field("configs", &self.configs.get().len())
            .field("sort", &self.effective_sort.get())
            .field("filters", &self.effective_filters.get())
            .field("quiet_period", &self.quiet_period)
            .finish()
    }
}

/// Replaces any earlier edit of the same field; the latest edit goes last.
fn fold_edit(edited: &[FilterState], edit: &FilterState) -> Vec<FilterState> {
    edited
        .iter()
        .filter(|f| f.field_id() != edit.field_id())
        .cloned()
        .chain(std::iter::once(edit.clone()))
        .collect()
}

/// External entries of untouched fields followed by the edits, without
/// inactive entries.
fn reconcile(external: &[FilterState], edited: &[FilterState]) -> Vec<FilterState> {
    external
        .iter()
        .filter(|f| !edited.iter().any(|e| e.field_id() == f.field_id()))
        .chain(edited.iter())
        .filter(|f| f.has_value())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::FilterConfig;
    use crate::model::FilterKind;

    fn columns() -> Vec<HeaderConfig> {
        vec![
            HeaderConfig::new("name", "Name")
                .sortable()
                .with_filter(FilterConfig::new(FilterKind::Text)),
            HeaderConfig::new("age", "Age").with_filter(FilterConfig::new(FilterKind::Text)),
            HeaderConfig::new("id", "Id"),
        ]
    }

    fn record<T: crate::reactive::Item>(stream: &Stream<T>) -> (Arc<Mutex<Vec<T>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = stream.subscribe(move |v: &T| sink.lock().unwrap().push(v.clone()));
        (seen, subscription)
    }

    #[test]
    fn test_reconcile_prunes_and_overrides() {
        let external = vec![FilterState::text("name", "a"), FilterState::text("age", "3")];
        let edited = vec![FilterState::text("name", ""), FilterState::text("city", "x")];
        assert_eq!(
            reconcile(&external, &edited),
            vec![FilterState::text("age", "3"), FilterState::text("city", "x")]
        );
    }

    #[test]
    fn test_fold_edit_replaces_same_field() {
        let edited = vec![FilterState::text("a", "1"), FilterState::text("b", "2")];
        let folded = fold_edit(&edited, &FilterState::text("a", "3"));
        assert_eq!(folded, vec![FilterState::text("b", "2"), FilterState::text("a", "3")]);
    }

    #[test]
    fn test_sort_is_last_writer_wins() {
        let row = HeaderRow::new(columns(), Duration::from_millis(10));
        row.set_sort(Some(SortState::ascending("name")));
        row.sort_edit("name", SortDirection::Descending);
        assert_eq!(row.current_sort(), Some(SortState::descending("name")));

        row.set_sort(Some(SortState::ascending("age")));
        assert_eq!(row.current_sort(), Some(SortState::ascending("age")));
    }

    #[test]
    fn test_header_states_overlay() {
        let row = HeaderRow::new(columns(), Duration::from_millis(10));
        let (states, _subscription) = record(&row.header_states());

        row.set_sort(Some(SortState::descending("name")));
        row.set_filters(vec![FilterState::text("age", "4")]);

        let last = states.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last.len(), 3);
        assert_eq!(last[0].sort_direction, SortDirection::Descending);
        assert_eq!(last[0].filter, None);
        assert_eq!(last[1].filter, Some(FilterState::text("age", "4")));
        assert_eq!(last[2].sort_direction, SortDirection::None);
    }

    #[test]
    fn test_sort_changes_only_from_edits() {
        let row = HeaderRow::new(columns(), Duration::from_millis(10));
        let (changes, _subscription) = record(&row.sort_changes());

        row.set_sort(Some(SortState::ascending("name")));
        row.sort_edit("name", SortDirection::Descending);
        assert_eq!(*changes.lock().unwrap(), vec![SortState::descending("name")]);
    }

    #[test]
    fn test_clear_all_targets_filterable_columns() {
        let row = HeaderRow::new(columns(), Duration::from_millis(10));
        row.set_filters(vec![FilterState::text("name", "a"), FilterState::text("age", "4")]);
        let (edits, _subscription) = record(&row.filter_edits.stream());

        row.clear_all();
        assert_eq!(
            *edits.lock().unwrap(),
            vec![FilterState::empty(FilterKind::Text, "name"), FilterState::empty(FilterKind::Text, "age")]
        );
        assert!(row.current_filters().is_empty());
    }

    #[test]
    fn test_bound_streams_detach_on_dispose() {
        let external = State::new(vec![FilterState::text("name", "a")]);
        let row = HeaderRow::new(columns(), Duration::from_millis(10));
        row.bind_filters(&external.stream());
        assert_eq!(row.current_filters(), vec![FilterState::text("name", "a")]);
        assert_eq!(external.subscriber_count(), 1);

        row.dispose();
        assert_eq!(external.subscriber_count(), 0);
        external.set(vec![FilterState::text("name", "b")]);
        assert_eq!(row.current_filters(), vec![FilterState::text("name", "a")]);
    }

    #[test]
    fn test_drop_detaches_bound_streams() {
        let configs = State::new(columns());
        let row = HeaderRow::new(Vec::new(), Duration::from_millis(10));
        row.bind_configs(&configs.stream());
        assert_eq!(row.configs().len(), 3);

        drop(row);
        assert_eq!(configs.subscriber_count(), 0);
    }
}
