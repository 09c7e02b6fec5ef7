//! Entity Client Layer
//!
//! REST access to the eleven collections, plus an in-memory stand-in.

mod envelope;
mod http;
mod memory;
mod traits;


pub use envelope::{decode_list, decode_record, error_message, unwrap_list, unwrap_record};
pub use http::HttpEntityClient;
pub use memory::InMemoryClient;
pub use traits::{EntityClient, Operation, Payload};
