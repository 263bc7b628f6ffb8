//! Docker Compose CLI integration
//!
//! Wraps the compose CLI behind a narrow provider trait so the restart
//! service can be tested against an in-memory backend.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::domain::stack::ComposeStack;
use crate::infra::command::{CommandError, CommandRunner};

/// Stack 枚举错误
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("compose ls failed: {0}")]
    Command(#[from] CommandError),

    #[error("failed to parse compose ls output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Narrow interface over the compose CLI
#[async_trait]
pub trait ComposeProvider {
    /// List stacks whose status starts with "running"
    ///
    /// An empty running-set is `Ok(vec![])`, not an error.
    async fn list_running_stacks(&self) -> Result<Vec<ComposeStack>, EnumerationError>;

    /// `down` a stack by project name and ordered config files
    async fn compose_down(&self, name: &str, config_files: &[String])
        -> Result<(), CommandError>;

    /// `up -d` a stack by project name and ordered config files
    async fn compose_up(&self, name: &str, config_files: &[String]) -> Result<(), CommandError>;
}

/// CLI-backed provider
pub struct ComposeCli {
    program: &'static str,
    prefix: Vec<&'static str>,
}

impl ComposeCli {
    /// Detect which docker-compose command to use
    /// (prefer standalone docker-compose, fall back to the docker plugin)
    pub async fn detect() -> Self {
        let check = CommandRunner::run("which", ["docker-compose"]).await;
        let cli = if check.map(|o| o.status.success()).unwrap_or(false) {
            Self::standalone()
        } else {
            Self::docker_plugin()
        };
        info!(program = cli.program, prefix = ?cli.prefix, "Using compose command");
        cli
    }

    /// Provider pinned to the standalone `docker-compose` binary
    pub fn standalone() -> Self {
        Self {
            program: "docker-compose",
            prefix: vec![],
        }
    }

    /// Provider pinned to the `docker compose` plugin
    pub fn docker_plugin() -> Self {
        Self {
            program: "docker",
            prefix: vec!["compose"],
        }
    }

    fn ls_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.prefix.iter().map(|s| s.to_string()).collect();
        args.extend(["ls", "--format", "json"].map(String::from));
        args
    }

    /// Build `-f <file>... -p <name> <subcommand...>` argument list,
    /// keeping the config files in their declared order
    fn stack_args(&self, name: &str, config_files: &[String], subcommand: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = self.prefix.iter().map(|s| s.to_string()).collect();
        for file in config_files {
            args.push("-f".to_string());
            args.push(file.clone());
        }
        args.push("-p".to_string());
        args.push(name.to_string());
        args.extend(subcommand.iter().map(|s| s.to_string()));
        args
    }
}

#[async_trait]
impl ComposeProvider for ComposeCli {
    async fn list_running_stacks(&self) -> Result<Vec<ComposeStack>, EnumerationError> {
        let output = CommandRunner::run_checked(self.program, self.ls_args()).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stacks: Vec<ComposeStack> = serde_json::from_str(&stdout)?;
        Ok(stacks.into_iter().filter(|s| s.is_running()).collect())
    }

    async fn compose_down(
        &self,
        name: &str,
        config_files: &[String],
    ) -> Result<(), CommandError> {
        CommandRunner::run_checked(self.program, self.stack_args(name, config_files, &["down"]))
            .await
            .map(|_| ())
    }

    async fn compose_up(&self, name: &str, config_files: &[String]) -> Result<(), CommandError> {
        CommandRunner::run_checked(
            self.program,
            self.stack_args(name, config_files, &["up", "-d"]),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ls_args_with_plugin_prefix() {
        let cli = ComposeCli::docker_plugin();
        assert_eq!(cli.ls_args(), vec!["compose", "ls", "--format", "json"]);
    }

    #[test]
    fn test_ls_args_standalone() {
        let cli = ComposeCli::standalone();
        assert_eq!(cli.ls_args(), vec!["ls", "--format", "json"]);
    }

    #[test]
    fn test_stack_args_orders_files_before_project() {
        let cli = ComposeCli::standalone();
        let files = vec!["a.yml".to_string(), "b.yml".to_string()];
        assert_eq!(
            cli.stack_args("web", &files, &["down"]),
            vec!["-f", "a.yml", "-f", "b.yml", "-p", "web", "down"]
        );
    }

    #[test]
    fn test_stack_args_up_detached() {
        let cli = ComposeCli::docker_plugin();
        let files = vec!["docker-compose.yml".to_string()];
        assert_eq!(
            cli.stack_args("web", &files, &["up", "-d"]),
            vec!["compose", "-f", "docker-compose.yml", "-p", "web", "up", "-d"]
        );
    }

    #[test]
    fn test_stack_args_uses_trimmed_config_file_list() {
        let stack = ComposeStack {
            name: "web".to_string(),
            status: "running(1)".to_string(),
            config_files: " a.yml, b.yml ".to_string(),
        };
        let cli = ComposeCli::standalone();
        assert_eq!(
            cli.stack_args(&stack.name, &stack.config_file_list(), &["down"]),
            vec!["-f", "a.yml", "-f", "b.yml", "-p", "web", "down"]
        );
    }
}
