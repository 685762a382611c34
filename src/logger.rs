use tracing_subscriber::EnvFilter;

/// 初始化日志（info 级别）
///
/// 重复调用不会报错（测试中可多次调用）。
pub fn init() {
    init_with_verbose(false);
}

/// 按配置初始化日志
///
/// 优先使用 `RUST_LOG`；未设置时默认 info，`verbose` 为 true 时为 debug。
pub fn init_with_verbose(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
