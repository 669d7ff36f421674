use anyhow::Result;

use quiz_generate_submit::config::Config;
use quiz_generate_submit::logger;
use quiz_generate_submit::orchestrator::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
