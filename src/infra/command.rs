//! 命令执行器
//!
//! 提供统一的外部命令调用接口：捕获 stdout/stderr，按需校验退出码。
//! 不设超时也不支持取消，调用方阻塞等待子进程自然退出。

use std::ffi::OsStr;
use std::process::Output;

use tokio::process::Command;

/// 命令执行器
pub struct CommandRunner;

/// 命令执行错误
#[derive(Debug)]
pub enum CommandError {
    /// 命令启动失败
    SpawnFailed(std::io::Error),
    /// 命令以非零退出码结束
    ExitedNonZero {
        code: Option<i32>,
        stderr: String,
    },
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::SpawnFailed(e) => write!(f, "Failed to spawn command: {}", e),
            CommandError::ExitedNonZero { code, stderr } => match code {
                Some(code) => write!(f, "Command exited with code {}: {}", code, stderr.trim()),
                None => write!(f, "Command terminated by signal: {}", stderr.trim()),
            },
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::SpawnFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl CommandRunner {
    /// 执行命令并捕获输出，不校验退出码
    pub async fn run<I, S>(program: &str, args: I) -> Result<Output, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(CommandError::SpawnFailed)
    }

    /// 执行命令，退出码非零视为错误
    pub async fn run_checked<I, S>(program: &str, args: I) -> Result<Output, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Self::run(program, args).await?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(CommandError::ExitedNonZero {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_checked_success() {
        let output = CommandRunner::run_checked("echo", ["hello"]).await.unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("hello"));
    }

    #[tokio::test]
    async fn test_run_spawn_failed() {
        let result = CommandRunner::run("nonexistent_command_12345", Vec::<String>::new()).await;
        assert!(matches!(result, Err(CommandError::SpawnFailed(_))));
    }

    #[tokio::test]
    async fn test_run_checked_nonzero_exit() {
        let result = CommandRunner::run_checked("sh", ["-c", "exit 3"]).await;
        match result {
            Err(CommandError::ExitedNonZero { code, .. }) => assert_eq!(code, Some(3)),
            other => panic!("expected ExitedNonZero, got {:?}", other.map(|o| o.status)),
        }
    }

    #[tokio::test]
    async fn test_run_does_not_check_exit_code() {
        let output = CommandRunner::run("sh", ["-c", "exit 3"]).await.unwrap();
        assert_eq!(output.status.code(), Some(3));
    }
}
