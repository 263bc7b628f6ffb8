//! Docker 资源清理任务

use tracing::{error, info};

use crate::infra::command::CommandRunner;

/// 执行 `docker system prune -f`
///
/// 失败只记录日志并放弃本轮，等待下次调度
pub async fn run_docker_cleanup() {
    info!("Running docker cleanup");

    match CommandRunner::run_checked("docker", ["system", "prune", "-f"]).await {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            // prune 的最后一行是回收量统计（"Total reclaimed space: ..."）
            if let Some(line) = stdout.lines().rev().find(|l| !l.trim().is_empty()) {
                info!("{}", line.trim());
            }
            info!("Docker cleanup complete");
        }
        Err(e) => {
            error!(error = %e, "Docker cleanup failed");
        }
    }
}
