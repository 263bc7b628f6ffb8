//! Compose Keeper - compose 主机维护守护进程
//!
//! 库入口：日志初始化 + 每周调度循环

pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod services;

use chrono::{Local, NaiveTime};
use tracing::{error, info};

use crate::config::env::constants;
use crate::config::EnvConfig;
use crate::infra::compose::ComposeCli;
use crate::services::restart::StackMaintenance;
use crate::services::scheduler::WeeklyJob;

/// 初始化日志并驱动调度循环，正常情况下永不返回
///
/// 任何一次任务执行失败只记录日志，循环继续等待下一个触发点
pub async fn init_and_run(config: EnvConfig) {
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init_console_only();
            error!(error = %e, "Failed to open log file, falling back to console-only output");
            None
        }
    };

    info!(
        version = constants::VERSION,
        "Logging initialized. Starting scheduler..."
    );

    let compose = ComposeCli::detect().await;
    let maintenance = StackMaintenance::new(compose, config.exclusions);

    let now = Local::now().naive_local();
    let cleanup_at =
        NaiveTime::from_hms_opt(constants::CLEANUP_HOUR, 0, 0).expect("valid cleanup time");
    let restart_at =
        NaiveTime::from_hms_opt(constants::RESTART_HOUR, 0, 0).expect("valid restart time");

    let mut cleanup_job = WeeklyJob::new(
        "docker-cleanup",
        constants::MAINTENANCE_WEEKDAY,
        cleanup_at,
        now,
    );
    let mut restart_job = WeeklyJob::new(
        "stack-restart",
        constants::MAINTENANCE_WEEKDAY,
        restart_at,
        now,
    );
    info!(job = cleanup_job.name(), next = %cleanup_job.next_run(), "Job scheduled");
    info!(job = restart_job.name(), next = %restart_job.next_run(), "Job scheduled");

    let mut tick =
        tokio::time::interval(std::time::Duration::from_secs(constants::POLL_INTERVAL_SECS));

    loop {
        tick.tick().await;
        let now = Local::now().naive_local();

        // 清理排在重启之前检查；循环单线程顺序执行，两个任务不会重叠
        if cleanup_job.is_due(now) {
            services::cleanup::run_docker_cleanup().await;
            cleanup_job.advance();
            info!(job = cleanup_job.name(), next = %cleanup_job.next_run(), "Job rescheduled");
        }

        if restart_job.is_due(now) {
            maintenance.restart_all_running().await;
            restart_job.advance();
            info!(job = restart_job.name(), next = %restart_job.next_run(), "Job rescheduled");
        }
    }
}
