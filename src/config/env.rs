//! 环境变量配置加载

use std::collections::HashSet;
use std::env;

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// 重启时排除的 stack 名单
    pub exclusions: ExclusionSet,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            exclusions: ExclusionSet::from_env(),
        }
    }
}

/// 不允许重启的 stack 名单
///
/// 进程启动时构建一次，之后只读。包含自身部署名，
/// 防止守护进程在容器里运行时把自己重启掉。
#[derive(Clone, Debug)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// 默认自身部署名 + `COMPOSE_PROJECT_NAME` 环境变量覆盖
    pub fn from_env() -> Self {
        let mut names = HashSet::new();
        names.insert(constants::DEFAULT_SELF_STACK.to_string());
        if let Some(own) = env::var("COMPOSE_PROJECT_NAME")
            .ok()
            .filter(|s| !s.is_empty())
        {
            names.insert(own);
        }
        Self { names }
    }

    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// 常量
pub mod constants {
    use chrono::Weekday;

    /// 自身 compose 项目名（docker-compose.yml 的默认值）
    pub const DEFAULT_SELF_STACK: &str = "compose-keeper";

    /// 维护任务所在的星期
    pub const MAINTENANCE_WEEKDAY: Weekday = Weekday::Mon;
    /// 清理任务触发时刻（小时）
    pub const CLEANUP_HOUR: u32 = 3;
    /// 重启任务触发时刻（小时），与清理错开一小时，先清理释放资源
    pub const RESTART_HOUR: u32 = 4;

    /// 调度轮询间隔（秒）
    pub const POLL_INTERVAL_SECS: u64 = 1;

    /// 日志目录
    pub const LOG_DIR: &str = "logs";
    /// 日志文件名
    pub const LOG_FILE: &str = "app.log";
    /// 单个日志文件大小上限（1 MiB）
    pub const LOG_MAX_BYTES: u64 = 1024 * 1024;

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_set_from_env() {
        env::remove_var("COMPOSE_PROJECT_NAME");
        let set = ExclusionSet::from_env();
        assert!(set.contains(constants::DEFAULT_SELF_STACK));
        assert!(!set.contains("some-other-stack"));

        env::set_var("COMPOSE_PROJECT_NAME", "my-own-stack");
        let set = ExclusionSet::from_env();
        assert!(set.contains("my-own-stack"));
        assert!(set.contains(constants::DEFAULT_SELF_STACK));
        env::remove_var("COMPOSE_PROJECT_NAME");
    }

    #[test]
    fn test_from_names() {
        let set = ExclusionSet::from_names(vec!["a".to_string(), "b".to_string()]);
        assert!(set.contains("a"));
        assert!(set.contains("b"));
        assert!(!set.contains("c"));
    }
}
