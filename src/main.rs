use anyhow::Result;
use question_import::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，命令行参数为额外的待导入文件
    let config = Config::from_env().with_input_files(std::env::args().skip(1));

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 初始化并运行应用
    let summary = App::initialize(config).await?.run().await?;

    if summary.failed_files > 0 {
        tracing::warn!("⚠️ {} 个文件导入失败，详见警告文件", summary.failed_files);
    }

    Ok(())
}
