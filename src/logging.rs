//! 日志初始化
//!
//! 双输出：大小受限的日志文件 + 控制台，进程启动时初始化一次。
//! 文件层通过 `tracing_appender::non_blocking` 写入，guard 由调用方持有。

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::env::constants::{LOG_DIR, LOG_FILE, LOG_MAX_BYTES};

/// 大小受限的日志文件写入器
///
/// 累计写入量达到上限后清空文件重新写入。不保留备份文件，
/// 最旧的数据在滚动时直接丢弃。
pub struct RollingFileWriter {
    file: fs::File,
    path: PathBuf,
    written: u64,
    max_bytes: u64,
}

impl RollingFileWriter {
    /// 以追加模式打开日志文件，从现有文件大小接续计数
    pub fn new(path: PathBuf, max_bytes: u64) -> std::io::Result<Self> {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            written,
            max_bytes,
        })
    }

    fn roll_over(&mut self) -> std::io::Result<()> {
        self.file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        if self.written >= self.max_bytes {
            if let Err(e) = self.roll_over() {
                // 滚动失败不中断 tracing 管道，文件可能暂时超限
                eprintln!("WARNING: log rollover failed: {}", e);
            }
        }
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

/// 初始化进程级日志：文件 + 控制台
///
/// 返回的 guard 必须在进程存续期间保持存活，否则文件层缓冲会被提前关闭
pub fn init() -> std::io::Result<WorkerGuard> {
    fs::create_dir_all(LOG_DIR)?;
    let writer = RollingFileWriter::new(Path::new(LOG_DIR).join(LOG_FILE), LOG_MAX_BYTES)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(writer);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// 仅控制台输出的降级初始化（日志文件不可写时使用）
pub fn init_console_only() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
