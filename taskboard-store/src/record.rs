//! The record abstraction the store persists

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row that lives at a position inside a container.
///
/// Cards (container = column) and columns (container = board) both implement
/// this, which is what lets one repositioning implementation serve both.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Primary key
    type Id: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;
    /// Owning container's key
    type ContainerId: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    fn container_id(&self) -> &Self::ContainerId;

    fn position(&self) -> u32;

    /// Move the record to `position` inside `container`.
    ///
    /// Container and position only ever change together.
    fn place(&mut self, container: Self::ContainerId, position: u32);

    /// Change the position without leaving the current container.
    fn set_position(&mut self, position: u32) {
        let container = self.container_id().clone();
        self.place(container, position);
    }
}
