mod store;

pub use store::{DOCUMENT_NAME, LoadError, Persist, SaveError, Store};
