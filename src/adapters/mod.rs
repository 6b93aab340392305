// Adapters layer: concrete implementations of the domain ports for local use.

pub mod storage;
pub mod upload;

pub use storage::LocalDocumentStore;
pub use upload::LocalImageUploader;
