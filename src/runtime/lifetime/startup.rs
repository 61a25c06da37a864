use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::blob::{BUCKETS, BlobStorage, LocalBlobStorage};
use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::clock::SystemClock;
use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use crate::grading::GradingWorkflow;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub struct StartupContext {
    pub workflow: GradingWorkflow,
    pub cache: Arc<dyn ObjectCache>,
}

/// 创建缓存实例
fn create_cache() -> Arc<dyn ObjectCache> {
    let config = AppConfig::get();
    warn!(
        "Creating moka cache backend (ttl {}s, capacity {})",
        config.cache.default_ttl, config.cache.max_capacity
    );
    Arc::new(MokaCacheWrapper::new(&config.cache))
}

/// 创建本地文件存储，并确保各 bucket 目录存在
async fn create_blob_storage() -> Result<Arc<dyn BlobStorage>> {
    let upload = &AppConfig::get().upload;
    for bucket in BUCKETS {
        let dir = Path::new(&upload.dir).join(bucket);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| LmsError::transient_io(format!("创建上传目录失败: {e}")))?;
        debug!("Upload bucket ready at {}", dir.display());
    }
    Ok(Arc::new(LocalBlobStorage::new(
        &upload.dir,
        &upload.public_base_url,
    )))
}

/// 准备服务器启动的上下文
/// 包括存储、文件存储、缓存和业务流程
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_async().await?);
    warn!("Storage backend initialized and migrations completed");

    let blobs = create_blob_storage().await?;
    warn!("Blob storage initialized");

    let cache = create_cache();
    warn!("Cache backend initialized");

    let workflow = GradingWorkflow::new(storage, blobs, Arc::new(SystemClock));
    Ok(StartupContext { workflow, cache })
}
