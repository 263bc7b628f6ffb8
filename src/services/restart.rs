//! Stack 重启服务
//!
//! 单个 stack 先 down 后 up，down 失败不执行 up。
//! 批量重启逐个顺序进行，单个 stack 失败不影响后续。

use thiserror::Error;
use tracing::{error, info};

use crate::config::env::ExclusionSet;
use crate::domain::stack::{partition_excluded, ComposeStack};
use crate::infra::command::CommandError;
use crate::infra::compose::ComposeProvider;

/// 重启错误类型
#[derive(Debug, Error)]
pub enum RestartError {
    #[error("compose down failed: {0}")]
    Down(#[source] CommandError),

    #[error("compose up failed: {0}")]
    Up(#[source] CommandError),
}

/// 单轮批量重启的统计，记录日志后即丢弃
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RestartSummary {
    pub found: usize,
    pub excluded: usize,
    pub attempted: usize,
    pub succeeded: usize,
}

/// 批量重启编排器
pub struct StackMaintenance<P: ComposeProvider> {
    provider: P,
    exclusions: ExclusionSet,
}

impl<P: ComposeProvider> StackMaintenance<P> {
    pub fn new(provider: P, exclusions: ExclusionSet) -> Self {
        Self {
            provider,
            exclusions,
        }
    }

    /// 重启所有运行中的 stack（排除名单除外）
    ///
    /// 枚举失败时放弃整轮，不使用部分结果；下个触发点再试
    pub async fn restart_all_running(&self) -> RestartSummary {
        let stacks = match self.provider.list_running_stacks().await {
            Ok(stacks) => stacks,
            Err(e) => {
                error!(error = %e, "Failed to enumerate compose stacks, skipping this run");
                return RestartSummary::default();
            }
        };

        if stacks.is_empty() {
            info!("No running compose stacks found");
            return RestartSummary::default();
        }

        let found = stacks.len();
        let (kept, excluded) = partition_excluded(stacks, &self.exclusions);
        info!(found, excluded, "Collected running stacks");

        if kept.is_empty() {
            info!("No stacks to restart after applying exclusions");
            return RestartSummary {
                found,
                excluded,
                ..Default::default()
            };
        }

        let attempted = kept.len();
        let mut succeeded = 0;
        for stack in &kept {
            info!(stack = %stack.name, "Restarting stack");
            match self.restart_stack(stack).await {
                Ok(()) => {
                    succeeded += 1;
                    info!(stack = %stack.name, "Successfully restarted stack");
                }
                Err(e) => {
                    error!(stack = %stack.name, error = %e, "Failed to restart stack");
                }
            }
        }

        info!("Successfully restarted {}/{} stacks", succeeded, attempted);
        RestartSummary {
            found,
            excluded,
            attempted,
            succeeded,
        }
    }

    /// 重启单个 stack
    ///
    /// up 失败时 stack 停留在停止状态，不做自动恢复
    async fn restart_stack(&self, stack: &ComposeStack) -> Result<(), RestartError> {
        let config_files = stack.config_file_list();

        info!(stack = %stack.name, "Stopping stack");
        self.provider
            .compose_down(&stack.name, &config_files)
            .await
            .map_err(RestartError::Down)?;

        info!(stack = %stack.name, "Starting stack");
        self.provider
            .compose_up(&stack.name, &config_files)
            .await
            .map_err(RestartError::Up)?;

        Ok(())
    }
}
