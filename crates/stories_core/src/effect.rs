use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the remote search for a confirmed query.
    FetchStories { request_id: RequestId, query: String },
    /// Write the draft query to the persistent store.
    PersistSearchTerm(String),
}
