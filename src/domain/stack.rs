//! Compose stack 领域模型

use serde::Deserialize;

use crate::config::env::ExclusionSet;

/// `docker compose ls --format json` 返回的 stack 记录
///
/// 每次枚举时重新获取，不做持久化
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComposeStack {
    #[serde(default)]
    pub name: String,
    /// 形如 "running(3)" 的状态描述
    #[serde(default)]
    pub status: String,
    /// 逗号分隔的 compose 配置文件路径，保持声明顺序
    #[serde(default)]
    pub config_files: String,
}

impl ComposeStack {
    pub fn is_running(&self) -> bool {
        self.status.starts_with("running")
    }

    /// 拆分配置文件列表：按逗号分割、去除两端空白、丢弃空项，保持顺序
    pub fn config_file_list(&self) -> Vec<String> {
        self.config_files
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// 应用排除名单
///
/// 返回保留的 stack（保持输入顺序）与被排除的数量。
/// 名字为空的记录一律排除，无论名单内容如何。
pub fn partition_excluded(
    stacks: Vec<ComposeStack>,
    excluded: &ExclusionSet,
) -> (Vec<ComposeStack>, usize) {
    let mut kept = Vec::with_capacity(stacks.len());
    let mut excluded_count = 0;

    for stack in stacks {
        if stack.name.is_empty() || excluded.contains(&stack.name) {
            tracing::info!(stack = %stack.name, "Excluding stack from restart");
            excluded_count += 1;
        } else {
            kept.push(stack);
        }
    }

    (kept, excluded_count)
}
