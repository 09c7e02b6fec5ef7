//! Table Screen
//!
//! One interactive list view per entity kind: store, derived rows, search,
//! sort, and the view/edit/delete modals.

mod state;
mod table;

#[cfg(test)]
mod tests;

pub use state::{DeleteSession, EditSession, ModalState, Phase};
pub use table::TableScreen;
