//! 基础设施模块
//!
//! 封装外部依赖（命令执行、compose CLI）

pub mod command;
pub mod compose;

pub use command::CommandRunner;
pub use compose::{ComposeCli, ComposeProvider};
