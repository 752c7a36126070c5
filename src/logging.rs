use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// 默认级别 info，--debug 提升到 debug；
/// RUST_LOG 环境变量可以进一步覆盖。日志走 stderr，
/// 审查报告本身走 stdout，两者互不干扰
pub fn init(debug: bool) -> anyhow::Result<()> {
    let level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("pr_review={level}").parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    Ok(())
}
