//! 领域模型模块
//!
//! 纯数据结构与过滤逻辑，不依赖 tokio

pub mod stack;

pub use stack::{partition_excluded, ComposeStack};
