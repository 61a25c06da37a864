//! 对象缓存
//!
//! 目前只用于缓存用户资料，键为 `profile:{id}`，资料更新时失效。

pub mod object_cache;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::models::profiles::entities::Profile;

pub use object_cache::moka::MokaCacheWrapper;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

pub fn profile_key(id: i64) -> String {
    format!("profile:{id}")
}

/// 读取并反序列化；内容损坏时删除该键
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Dropping undecodable cache entry {}: {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
    if let Ok(json) = serde_json::to_string(value) {
        cache.insert_raw(key, json, ttl).await;
    }
}

pub async fn cached_profile(cache: &dyn ObjectCache, id: i64) -> Option<Profile> {
    get_json(cache, &profile_key(id)).await
}

pub async fn invalidate_profile(cache: &dyn ObjectCache, id: i64) {
    cache.remove(&profile_key(id)).await;
}
