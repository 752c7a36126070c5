use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pr-review",
    version,
    about = "Submit a GitHub pull request to the multi-agent review service"
)]
pub struct Args {
    /// 待审查的 GitHub PR 链接，例如 https://github.com/owner/repo/pull/123
    pub pr_url: String,

    /// 审查报告输出格式 (text, markdown, json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// 审查报告输出文件，不指定时输出到控制台
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// 额外输出原始结果 JSON（未分组，便于复制导出）
    #[arg(long, default_value_t = false)]
    pub copy_json: bool,

    /// 审查服务地址（覆盖环境变量和配置文件）
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// 请求超时时间（秒）
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// 输出调试信息
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
