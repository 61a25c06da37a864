//! Sejarah LMS - 历史课学习管理系统后端服务
//!
//! 基于 Actix Web 构建的作业提交与成绩管理后端。
//!
//! # 架构
//! - `blob`: 文件存储（本地磁盘）
//! - `cache`: 缓存层（Moka）
//! - `clock`: 时间源
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 作业生命周期、评分流程与成绩汇总
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: HTTP 服务层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod blob;
pub mod cache;
pub mod clock;
pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
