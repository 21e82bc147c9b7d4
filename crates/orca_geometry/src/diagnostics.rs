// crates/orca_geometry/src/diagnostics.rs

//! 构造期诊断
//!
//! 几何构造的各个阶段输出一行状态：已用时间和进程峰值常驻内存。
//! 诊断失败不影响构造。通过 [`Diagnostics`] 注入，测试中可替换为
//! [`NoopDiagnostics`]。

use std::time::{Duration, Instant};

/// 诊断接收端
pub trait Diagnostics {
    /// 记录一个构造里程碑
    fn log_status(&self, milestone: &str);
}

/// 无操作诊断
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn log_status(&self, _milestone: &str) {}
}

/// 计时诊断
///
/// 创建即开始计时，drop 时输出总耗时。状态行写入 `log::trace!`。
#[derive(Debug)]
pub struct StatusTimer {
    label: String,
    start: Instant,
}

impl StatusTimer {
    /// 创建并开始计时
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// 已用时间
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 标签
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Diagnostics for StatusTimer {
    fn log_status(&self, milestone: &str) {
        let memory = peak_rss_bytes()
            .map(|bytes| format!("{:.6} Gb", bytes as f64 / 1.0e9))
            .unwrap_or_else(|| "n/a".to_string());
        log::trace!(
            "{}log_status [{}] {:.6}s {}",
            self.label,
            milestone,
            self.elapsed().as_secs_f64(),
            memory
        );
    }
}

impl Drop for StatusTimer {
    fn drop(&mut self) {
        log::trace!("{}总耗时 {:.6}s", self.label, self.elapsed().as_secs_f64());
    }
}

/// 进程峰值常驻内存 [bytes]
#[cfg(unix)]
pub fn peak_rss_bytes() -> Option<u64> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: getrusage 只写入传入的 rusage 结构
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    // SAFETY: rc == 0 时结构已初始化
    let usage = unsafe { usage.assume_init() };
    let max_rss = u64::try_from(usage.ru_maxrss).ok()?;
    // Linux 以 KiB 为单位，macOS 以字节为单位
    if cfg!(target_os = "macos") {
        Some(max_rss)
    } else {
        Some(max_rss * 1024)
    }
}

/// 进程峰值常驻内存 [bytes]
#[cfg(not(unix))]
pub fn peak_rss_bytes() -> Option<u64> {
    None
}
