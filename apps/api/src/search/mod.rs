// Job search: aggregate candidates from every source, then rank them by relevance.

pub mod handlers;
pub mod pipeline;
