use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ReviewError;
use crate::models::ReviewComment;

/// 审查请求体，固定只带 PR 链接一个字段
#[derive(Serialize)]
struct ReviewRequestBody<'a> {
    pr_url: &'a str,
}

/// 审查服务后端接口
///
/// 控制器通过这个接口发请求，测试里用模拟实现替换真实 HTTP 客户端。
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn request_review(&self, pr_url: &str) -> Result<Vec<ReviewComment>, ReviewError>;
}

/// 基于 reqwest 的审查服务客户端
///
/// 每次提交发送一个 POST 请求，整体超时由客户端配置控制，
/// 超时和连接失败都以网络错误形式返回。
pub struct ReviewClient {
    client: reqwest::Client,
    service_url: String,
}

impl ReviewClient {
    pub fn new(service_url: impl Into<String>, timeout: Duration) -> Result<Self, ReviewError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::transport(format!("HTTP 客户端初始化失败: {e}")))?;

        Ok(Self {
            client,
            service_url: service_url.into(),
        })
    }

    pub fn from_config(config: &crate::config::Config) -> Result<Self, ReviewError> {
        Self::new(
            config.service_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl ReviewBackend for ReviewClient {
    async fn request_review(&self, pr_url: &str) -> Result<Vec<ReviewComment>, ReviewError> {
        debug!(url = %self.service_url, "提交审查请求");

        let res = self
            .client
            .post(&self.service_url)
            .json(&ReviewRequestBody { pr_url })
            .send()
            .await
            .map_err(|e| ReviewError::transport(format!("请求失败: {e}")))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ReviewError::transport(format!("读取响应失败: {e}")))?;

        if !status.is_success() {
            debug!(%status, "审查服务返回非成功状态");
            let message = parse_error_detail(&text)
                .unwrap_or_else(|| format!("服务错误: 状态码 {status}"));
            return Err(ReviewError::service(message));
        }

        parse_success_body(&text)
    }
}

/// 从失败响应体中提取 detail 字段的人类可读信息。
/// 响应体不是 JSON 对象或没有 detail 字段时返回 None，由调用方兜底
pub fn parse_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// 解析成功响应体
///
/// 服务正常返回 JSON 数组。个别部署会把数组再编码一层，
/// 成为包含数组的 JSON 字符串，此时需要二次解析；二次解析失败
/// 按"无发现"处理，返回空列表而不是报错。
/// 响应体连 JSON 都不是时作为网络错误返回。
pub fn parse_success_body(body: &str) -> Result<Vec<ReviewComment>, ReviewError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ReviewError::transport(format!("响应体不是合法 JSON: {e}")))?;

    match value {
        Value::String(inner) => match serde_json::from_str(&inner) {
            Ok(comments) => Ok(comments),
            Err(e) => {
                warn!("二次解析审查结果失败，按空结果处理: {e}");
                Ok(Vec::new())
            }
        },
        other => serde_json::from_value(other)
            .map_err(|e| ReviewError::transport(format!("解析审查结果失败: {e}"))),
    }
}
