//! 配置模块
//!
//! 环境变量解析与静态配置

pub mod env;

pub use env::{EnvConfig, ExclusionSet};
