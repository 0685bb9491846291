use config::{Config, ConfigError, Environment, File};
use kabuka_core::config::AppConfig;

/// 默认配置文件 (不含扩展名，可为 toml / yaml / json)
pub const DEFAULT_CONFIG_FILE: &str = "config/kabuka";
/// 环境变量前缀，如 `KABUKA__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "KABUKA";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加可选的配置文件，文件不存在时跳过。
/// 3. 叠加 `KABUKA__` 前缀的环境变量，`__` 分隔层级。
///
/// # Arguments
/// * `file`: 配置文件路径 (不含扩展名亦可)。
///
/// # Returns
/// 成功返回合并后的配置，格式或类型错误返回 ConfigError。
pub fn load(file: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load("does/not/exist").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.feed.timeout_secs, 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[feed]\ntimeout_secs = 3\n\n[log]\ndir = \"logs\""
        )
        .unwrap();

        let config = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.feed.timeout_secs, 3);
        assert_eq!(config.log.dir.as_deref(), Some("logs"));
    }
}
