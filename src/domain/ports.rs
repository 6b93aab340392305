use crate::domain::model::{ProjectDocument, UploadedImage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// 外部儲存：整份文件讀取與整份取代，不做部分欄位交易
pub trait DocumentStore: Send + Sync {
    /// Raw stored JSON in whatever shape it was written; `None` when absent.
    fn load(&self, id: &str) -> impl std::future::Future<Output = Result<Option<Value>>> + Send;
    fn save(
        &self,
        document: &ProjectDocument,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, content: &[u8], filename: &str) -> Result<UploadedImage>;
}
