/// # Summary
/// 为进程安装 rustls 的 ring 加密后端。
///
/// # Logic
/// 1. HTTP 客户端以 `rustls-no-provider` 方式编译，必须在首次建连前安装后端。
/// 2. 重复安装会返回错误，此时说明已有后端可用，直接忽略。
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }
}
