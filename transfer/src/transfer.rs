//! The transfer controller.
//!
//! `Transfer<T>` owns the selection store and the caller's callbacks. The
//! dataset and target keys stay with the caller and are passed in on every
//! call; the controller only ever proposes new target keys through
//! `on_change`.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use transfer::{Direction, Pane, Record, Transfer};
//!
//! let dataset = vec![Record::new("1", "Read"), Record::new("2", "Write")];
//! let mut target_keys: Vec<String> = Vec::new();
//!
//! let proposed = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&proposed);
//! let mut transfer = Transfer::<Record>::new().on_change(move |change| {
//!     *sink.borrow_mut() = Some(change.target_keys.clone());
//! });
//!
//! transfer.sync(&dataset, &target_keys, None);
//! transfer.toggle_item(Pane::Source, "2".to_string(), true);
//! transfer.move_to(Direction::Right, &dataset, &target_keys);
//!
//! if let Some(next) = proposed.borrow_mut().take() {
//!     target_keys = next;
//! }
//! assert_eq!(target_keys, vec!["2".to_string()]);
//! ```

use log::{debug, trace};

use crate::filter::{self, FilterMode, FilterOption};
use crate::item::{RowKey, TransferItem};
use crate::key_map;
use crate::moves::{self, MovePlan};
use crate::operators::{self, CheckStatus};
use crate::pane::{Direction, Layout, Pane, Side};
use crate::partition::{self, Partition, Row};
use crate::selection::SelectAll;
use crate::store::SelectionStore;

/// Payload of the `on_change` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferChange<K> {
    /// The proposed new target keys.
    pub target_keys: Vec<K>,
    pub direction: Direction,
    /// Keys that changed pane.
    pub moved_keys: Vec<K>,
}

impl<K> TransferChange<K> {
    fn from_plan(plan: MovePlan<K>, direction: Direction) -> Self {
        Self {
            target_keys: plan.target_keys,
            direction,
            moved_keys: plan.moved_keys,
        }
    }
}

/// Called with every proposed target-key change.
pub type ChangeHandler<K> = Box<dyn FnMut(&TransferChange<K>)>;

/// Called with `(source_selected, target_selected)` after every selection change.
pub type SelectChangeHandler<K> = Box<dyn FnMut(&[K], &[K])>;

/// Optional caller callbacks. Missing callbacks are skipped.
pub struct TransferHandlers<K> {
    pub on_change: Option<ChangeHandler<K>>,
    pub on_select_change: Option<SelectChangeHandler<K>>,
}

impl<K> Default for TransferHandlers<K> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_select_change: None,
        }
    }
}

impl<K: Clone + Eq + std::hash::Hash> TransferHandlers<K> {
    fn changed(&mut self, change: &TransferChange<K>) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(change);
        }
    }

    fn selection_changed(&mut self, store: &SelectionStore<K>) {
        if let Some(handler) = self.on_select_change.as_mut() {
            handler(store.source_selected(), store.target_selected());
        }
    }
}

/// Search text for both panes.
#[derive(Debug, Clone, Default)]
struct Search {
    source: String,
    target: String,
}

impl Search {
    fn get(&self, pane: Pane) -> &str {
        match pane {
            Pane::Source => &self.source,
            Pane::Target => &self.target,
        }
    }

    fn set(&mut self, pane: Pane, query: String) {
        match pane {
            Pane::Source => self.source = query,
            Pane::Target => self.target = query,
        }
    }
}

/// Selection and move engine for a dual-pane transfer.
pub struct Transfer<T: TransferItem> {
    store: SelectionStore<T::Key>,
    handlers: TransferHandlers<T::Key>,
    row_key: Option<RowKey<T>>,
    filter_mode: FilterMode,
    filter_option: Option<FilterOption<T>>,
    search: Search,
    one_way: bool,
    disabled: bool,
    layout: Layout,
}

impl<T: TransferItem> Default for Transfer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TransferItem> Transfer<T> {
    /// Create a transfer that owns its selection.
    pub fn new() -> Self {
        Self::with_store(SelectionStore::uncontrolled())
    }

    /// Create a transfer whose selection is supplied by the caller.
    ///
    /// Feed later values through [`Transfer::sync`].
    pub fn controlled(selected_keys: &[T::Key], target_keys: &[T::Key]) -> Self {
        Self::with_store(SelectionStore::controlled(selected_keys, target_keys))
    }

    fn with_store(store: SelectionStore<T::Key>) -> Self {
        Self {
            store,
            handlers: TransferHandlers::default(),
            row_key: None,
            filter_mode: FilterMode::default(),
            filter_option: None,
            search: Search::default(),
            one_way: false,
            disabled: false,
            layout: Layout::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn on_change(mut self, handler: impl FnMut(&TransferChange<T::Key>) + 'static) -> Self {
        self.handlers.on_change = Some(Box::new(handler));
        self
    }

    pub fn on_select_change(mut self, handler: impl FnMut(&[T::Key], &[T::Key]) + 'static) -> Self {
        self.handlers.on_select_change = Some(Box::new(handler));
        self
    }

    /// Derive keys with `row_key` instead of [`TransferItem::key`].
    pub fn with_row_key(mut self, row_key: impl Fn(&T) -> T::Key + 'static) -> Self {
        self.row_key = Some(Box::new(row_key));
        self
    }

    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Use a custom search predicate instead of the built-in filter modes.
    pub fn with_filter_option(mut self, option: impl Fn(&str, &T, Pane) -> bool + 'static) -> Self {
        self.filter_option = Some(Box::new(option));
        self
    }

    /// Only allow moves into the target pane; the target pane gets removals.
    pub fn with_one_way(mut self, one_way: bool) -> Self {
        self.one_way = one_way;
        self
    }

    /// Disable every operation.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &SelectionStore<T::Key> {
        &self.store
    }

    pub fn source_selected(&self) -> &[T::Key] {
        self.store.source_selected()
    }

    pub fn target_selected(&self) -> &[T::Key] {
        self.store.target_selected()
    }

    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The pane rendered on `side` under the current layout.
    pub fn pane_at(&self, side: Side) -> Pane {
        side.pane(self.layout)
    }

    pub fn search(&self, pane: Pane) -> &str {
        self.search.get(pane)
    }

    pub fn set_search(&mut self, pane: Pane, query: impl Into<String>) {
        self.search.set(pane, query.into());
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Bring the selection in line with the caller's latest inputs.
    ///
    /// Call this on every evaluation, before handling events. `selected` is
    /// the caller's selection in controlled mode and ignored otherwise.
    /// Selected keys that match no dataset item are dropped from both panes.
    pub fn sync(&mut self, dataset: &[T], target_keys: &[T::Key], selected: Option<&[T::Key]>) {
        self.store.sync(selected, target_keys);
        let known = key_map::dataset_keys(dataset, self.row_key.as_ref());
        self.store.retain(|key| known.contains(key));
    }

    /// Split the dataset into source and target rows.
    pub fn partition<'a>(&self, dataset: &'a [T], target_keys: &[T::Key]) -> Partition<'a, T> {
        partition::partition(dataset, target_keys, self.row_key.as_ref())
    }

    /// Rows of `pane` matching the pane's search text.
    pub fn visible_rows<'a>(&self, pane: Pane, split: &Partition<'a, T>) -> Vec<Row<'a, T>> {
        let rows = split.rows(pane);
        let query = self.search.get(pane);
        match &self.filter_option {
            Some(option) => filter::filter_rows_with(rows, query, pane, option),
            None => filter::filter_rows(rows, query, self.filter_mode),
        }
    }

    /// State of the pane's "select all" checkbox for `rows`.
    pub fn check_status(&self, pane: Pane, rows: &[Row<'_, T>]) -> CheckStatus {
        operators::check_status(rows, self.store.selection(pane))
    }

    /// Whether a move in `direction` would move anything.
    pub fn can_move(&self, direction: Direction, dataset: &[T]) -> bool {
        if self.disabled || (self.one_way && direction == Direction::Left) {
            return false;
        }
        let disabled = key_map::disabled_keys(dataset, self.row_key.as_ref());
        let known = key_map::dataset_keys(dataset, self.row_key.as_ref());
        self.store
            .selection(direction.origin())
            .iter()
            .any(|key| known.contains(key) && !disabled.contains(key))
    }

    // -------------------------------------------------------------------------
    // Selection operators
    // -------------------------------------------------------------------------

    /// Select or deselect a single key.
    pub fn toggle_item(&mut self, pane: Pane, key: T::Key, checked: bool) {
        if self.disabled {
            return;
        }
        trace!("Toggle {:?} in {} -> {}", key, pane, checked);
        if !self.store.toggle_item(pane, key.clone(), checked) {
            return;
        }
        self.store.set_anchor(pane, Some(key));
        self.handlers.selection_changed(&self.store);
    }

    /// Union (`check_all`) or subtract (`!check_all`) `keys` in a pane.
    pub fn select_all(&mut self, pane: Pane, keys: &[T::Key], check_all: bool) {
        self.select_keys(pane, keys, SelectAll::from(check_all));
    }

    /// Apply a batch of keys to a pane.
    pub fn select_keys(&mut self, pane: Pane, keys: &[T::Key], mode: SelectAll) {
        if self.disabled {
            return;
        }
        trace!("{:?} {} key(s) in {}", mode, keys.len(), pane);
        self.store.apply(pane, keys, mode);
        self.handlers.selection_changed(&self.store);
    }

    /// Toggle every enabled row in `rows` according to the checkbox state.
    pub fn select_visible(&mut self, pane: Pane, rows: &[Row<'_, T>]) {
        let check_all = self.check_status(pane, rows) != CheckStatus::All;
        let keys = operators::enabled_keys(rows);
        self.select_all(pane, &keys, check_all);
    }

    /// Invert the selection of the enabled rows in `rows`.
    pub fn invert(&mut self, pane: Pane, rows: &[Row<'_, T>]) {
        let visible = operators::enabled_keys(rows);
        let next = operators::invert(self.store.selection(pane), &visible);
        self.select_keys(pane, &next, SelectAll::Replace);
    }

    /// Shift-click selection.
    ///
    /// Checks or unchecks every enabled row between the pane's last clicked
    /// row and `key`. Without a usable anchor this is a plain toggle.
    pub fn select_range(&mut self, pane: Pane, rows: &[Row<'_, T>], key: T::Key, checked: bool) {
        if self.disabled {
            return;
        }
        let ordered = operators::enabled_keys(rows);
        let range = self
            .store
            .anchor(pane)
            .and_then(|anchor| operators::range_keys(&ordered, anchor, &key));

        match range {
            Some(keys) => {
                trace!("Range {} key(s) in {} -> {}", keys.len(), pane, checked);
                self.store.apply(pane, &keys, SelectAll::from(checked));
                self.store.set_anchor(pane, Some(key));
                self.handlers.selection_changed(&self.store);
            }
            None => self.toggle_item(pane, key, checked),
        }
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Move the originating pane's selected, enabled items.
    ///
    /// Clears the originating pane's selection and reports it, then reports
    /// the proposed target keys. Returns `None` when the move is not
    /// allowed at all (disabled control, or a left move in one-way mode).
    pub fn move_to(
        &mut self,
        direction: Direction,
        dataset: &[T],
        target_keys: &[T::Key],
    ) -> Option<TransferChange<T::Key>> {
        if self.disabled || (self.one_way && direction == Direction::Left) {
            debug!("Move {} not allowed", direction);
            return None;
        }

        let plan = moves::move_to(
            direction,
            self.store.source_selected(),
            self.store.target_selected(),
            dataset,
            target_keys,
            self.row_key.as_ref(),
        );
        debug!(
            "Move {}: {} key(s), {} target key(s)",
            direction,
            plan.moved_keys.len(),
            plan.target_keys.len()
        );

        self.store.clear(direction.origin());
        self.handlers.selection_changed(&self.store);

        let change = TransferChange::from_plan(plan, direction);
        self.handlers.changed(&change);
        Some(change)
    }

    /// Remove `keys` from the target pane (one-way mode).
    ///
    /// Clears the target selection and reports a `Left` change.
    pub fn remove(
        &mut self,
        keys: &[T::Key],
        target_keys: &[T::Key],
    ) -> Option<TransferChange<T::Key>> {
        if self.disabled || !self.one_way {
            debug!("Remove not allowed");
            return None;
        }

        let plan = moves::plan_remove(keys, target_keys);
        debug!("Remove {} key(s)", plan.moved_keys.len());

        self.store.clear(Pane::Target);
        self.handlers.selection_changed(&self.store);

        let change = TransferChange::from_plan(plan, Direction::Left);
        self.handlers.changed(&change);
        Some(change)
    }

    /// Remove every enabled row in `rows` from the target pane.
    pub fn remove_all(
        &mut self,
        rows: &[Row<'_, T>],
        target_keys: &[T::Key],
    ) -> Option<TransferChange<T::Key>> {
        let keys = operators::enabled_keys(rows);
        self.remove(&keys, target_keys)
    }
}
