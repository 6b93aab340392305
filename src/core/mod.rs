pub mod catalog;
pub mod list_ops;
pub mod mutation;
pub mod normalizer;
pub mod path;
pub mod session;

pub use catalog::{FieldKind, FieldSpec, SectionSpec, SECTIONS};
pub use mutation::SchemaNode;
pub use normalizer::{NormalizationRule, Normalizer};
pub use path::{DocPath, Segment};
pub use session::{Edit, EditSession};
