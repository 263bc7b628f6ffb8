//! Compose Keeper - compose 主机维护守护进程
//!
//! 无命令行参数，前台常驻运行，仅由外部信号终止。
//! 每周一凌晨执行两项维护任务：
//! - 03:00 Docker 资源清理（system prune）
//! - 04:00 重启所有运行中的 compose stack（排除自身部署）

use compose_keeper::config::EnvConfig;

fn main() {
    let config = EnvConfig::from_env();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    rt.block_on(async {
        compose_keeper::init_and_run(config).await;
    });
}
