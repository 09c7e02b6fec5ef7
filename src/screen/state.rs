//! Screen state machine
//!
//! `Loading -> Ready`, with one modal at a time while `Ready`. Modals hold
//! snapshots taken when they were opened; live events never touch them.

use crate::domain::{Entity, FieldErrors, RecordId};
use crate::validation::FormState;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Loading,
    Ready(ModalState<T>),
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn modal(&self) -> Option<&ModalState<T>> {
        match self {
            Phase::Ready(modal) => Some(modal),
            Phase::Loading => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Idle,
    View(T),
    Edit(EditSession<T>),
    Delete(DeleteSession<T>),
}

/// Create (no `original`) or edit an existing record
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<T> {
    pub original: Option<T>,
    pub form: FormState,
    pub errors: FieldErrors,
    /// Last submit failure, shown inside the modal
    pub error: Option<String>,
}

impl<T: Entity> EditSession<T> {
    pub fn create() -> Self {
        Self {
            original: None,
            form: FormState::new(),
            errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn edit(record: T) -> Self {
        Self {
            form: FormState::from_record(&record),
            original: Some(record),
            errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn is_create(&self) -> bool {
        self.original.is_none()
    }

    pub fn original_id(&self) -> Option<&RecordId> {
        self.original.as_ref().map(Entity::id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSession<T> {
    pub record: T,
    pub error: Option<String>,
}
