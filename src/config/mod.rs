use std::env;
use std::path::PathBuf;

/// 默认的审查服务地址
pub const DEFAULT_SERVICE_URL: &str = "https://github-pr-review.onrender.com/review";

/// 默认请求超时（秒）。多智能体审查耗时较长，超时放宽一些
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: String,
    pub timeout_secs: u64,
    pub debug: bool,
}

impl Config {
    pub fn new() -> Self {
        // 默认配置
        let mut config = Config {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
        };

        // 加载配置文件
        #[cfg(not(test))]
        config.load_from_env_file();
        // 加载环境变量（覆盖配置文件）
        config.load_from_env();

        config
    }

    pub fn load_from_env_file(&mut self) {
        // 尝试从用户主目录加载
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(format!("{}/.pr-review/.env", home));
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        // 尝试从当前目录加载
        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) {
        if let Ok(url) = env::var("PR_REVIEW_SERVICE_URL") {
            self.service_url = url;
        }
        if let Ok(timeout) = env::var("PR_REVIEW_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.timeout_secs = secs;
            }
        }
        if let Ok(debug) = env::var("PR_REVIEW_DEBUG") {
            self.debug = debug == "1" || debug.eq_ignore_ascii_case("true");
        }
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // 命令行参数优先级最高
        if let Some(url) = &args.service_url {
            self.service_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if args.debug {
            self.debug = true;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.service_url.trim().is_empty() {
            anyhow::bail!("审查服务地址为空，请设置 PR_REVIEW_SERVICE_URL 或使用 --service-url");
        }
        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            anyhow::bail!(
                "审查服务地址必须以 http:// 或 https:// 开头: {}",
                self.service_url
            );
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("请求超时必须大于 0 秒");
        }
        Ok(())
    }
}
