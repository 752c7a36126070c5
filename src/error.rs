use thiserror::Error;

/// 审查客户端错误类型
///
/// 三类错误都只终结当前这一次提交：会话进入 Failure 并携带
/// 用户可见的消息，进程不会因此退出，用户可以重新提交或复位。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// 输入校验失败，从不触发网络请求
    #[error("校验错误: {message}")]
    Validation { message: String },

    /// 网络不可达、超时或响应体无法解析
    #[error("网络错误: {message}")]
    Transport { message: String },

    /// 服务端返回非成功状态
    #[error("服务错误: {message}")]
    Service { message: String },
}

impl ReviewError {
    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::Validation {
            message: message.into(),
        }
    }

    /// 创建网络错误
    pub fn transport(message: impl Into<String>) -> Self {
        ReviewError::Transport {
            message: message.into(),
        }
    }

    /// 创建服务错误
    pub fn service(message: impl Into<String>) -> Self {
        ReviewError::Service {
            message: message.into(),
        }
    }

    /// 检查错误是否可重试：网络和服务错误换一次提交即可重试，
    /// 校验错误需要先修正输入
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ReviewError::Validation { .. })
    }
}
