//! Selection and partition engine for dual-pane transfer lists.
//!
//! A transfer shows a dataset split into a source pane and a target pane.
//! The caller owns the dataset and the ordered list of target keys; this
//! crate derives the two panes, tracks what is selected in each, and
//! computes what a move, select-all, invert or removal does, reporting the
//! results through `on_change` and `on_select_change` callbacks.
//!
//! Rendering is left to the host UI.

pub mod error;
pub mod filter;
pub mod item;
pub mod key_map;
pub mod moves;
pub mod operators;
pub mod pane;
pub mod partition;
pub mod selection;
pub mod store;
mod transfer;

pub use error::ParseError;
pub use filter::{FilterMode, FilterOption, filter_rows};
pub use item::{Record, RowKey, TransferItem};
pub use moves::{MovePlan, move_to, newest_first};
pub use operators::CheckStatus;
pub use pane::{Direction, Layout, Pane, Side};
pub use partition::{Partition, Row, partition};
pub use selection::{SelectAll, Selection};
pub use store::{SelectionMode, SelectionStore};
pub use transfer::{
    ChangeHandler, SelectChangeHandler, Transfer, TransferChange, TransferHandlers,
};

pub mod prelude {
    pub use crate::{
        CheckStatus, Direction, FilterMode, Layout, Pane, Record, Row, SelectAll, Side, Transfer,
        TransferChange, TransferItem,
    };
}
