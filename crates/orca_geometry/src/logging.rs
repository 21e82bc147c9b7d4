// crates/orca_geometry/src/logging.rs

//! 日志初始化
//!
//! 本 crate 只通过 `log` 门面输出；宿主程序可调用 [`init_logging`] 安装
//! `env_logger`。构造期状态行使用 trace 级别。

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

/// 解析日志级别：显式参数优先，其次 `RUST_LOG`，默认 info
pub fn resolve_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|v| v.parse::<LevelFilter>().ok())
        })
        .unwrap_or(LevelFilter::Info)
}

/// 初始化日志系统
///
/// 重复调用时保留第一次的设置，返回 `false`。
///
/// # 示例
///
/// ```rust
/// orca_geometry::logging::init_logging(Some("trace"));
/// ```
pub fn init_logging(level: Option<&str>) -> bool {
    let log_level = resolve_level(level);

    let installed = Builder::new()
        .filter_level(log_level)
        .target(Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5} {}:{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record
                    .file()
                    .unwrap_or("unknown")
                    .rsplit('/')
                    .next()
                    .unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
        .is_ok();

    if installed {
        log::info!(
            "日志系统初始化完成 (Level: {})",
            log_level.to_string().to_uppercase()
        );
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_level() {
        assert_eq!(resolve_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(resolve_level(Some("TRACE")), LevelFilter::Trace);
    }

    #[test]
    fn test_init_twice() {
        let _ = init_logging(Some("warn"));
        assert!(!init_logging(Some("warn")));
    }
}
