/// Change notification emitted after every successful entry mutation.
///
/// Events carry the persisted row (not the request payload) so consumers see
/// server-assigned fields. Delivery is best-effort: consumers must treat
/// application of an event as an idempotent upsert or removal keyed by id, so
/// duplicate or out-of-order delivery converges on the same state.
#[derive(Clone, Debug)]
pub enum EntryEvent {
    Inserted(entity::kontowart_entry::Model),
    Updated(entity::kontowart_entry::Model),
    Deleted(i32),
}

impl EntryEvent {
    /// The id of the entry the event refers to.
    pub fn entry_id(&self) -> i32 {
        match self {
            Self::Inserted(model) | Self::Updated(model) => model.id,
            Self::Deleted(id) => *id,
        }
    }
}
