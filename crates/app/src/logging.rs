use kabuka_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. `RUST_LOG` 存在时优先，否则使用配置中的级别。
/// 2. 始终输出到终端。
/// 3. 配置了日志目录时额外按天滚动写入 `kabuka.log`。
///
/// # Returns
/// 文件日志的后台写入守卫，需持有到进程退出，否则尾部日志会丢失。
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "kabuka.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            registry.try_init()?;
            Ok(None)
        }
    }
}
