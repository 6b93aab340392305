pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

pub use adapters::{LocalDocumentStore, LocalImageUploader};
pub use config::AppConfig;
pub use core::{normalizer::normalize, DocPath, Edit, EditSession, Normalizer};
pub use domain::model::{ImageRef, ProjectDocument, ProjectStatus, UploadedImage};
pub use domain::ports::{DocumentStore, ImageUploader};
pub use render::{markdown::to_markdown, ContentBlock, RenderedSection, Renderer};
pub use utils::error::{CaseStudyError, Result};
