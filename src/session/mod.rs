use std::sync::Arc;

use tracing::debug;

use crate::error::ReviewError;
use crate::models::ReviewComment;
use crate::service::ReviewBackend;

/// GitHub PR 链接的宿主标识。校验只做浅层子串检查，
/// 不验证链接可达或 PR 存在
const GITHUB_HOST: &str = "github.com";

/// 审查会话状态机
///
/// Idle → Validating → Loading → Success | Failure。
/// Success / Failure 之后新的提交重新进入 Validating；
/// reset 从任意状态无条件回到 Idle。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Validating,
    Loading,
    Success(Vec<ReviewComment>),
    Failure(String),
}

/// 一次审查会话的完整状态
///
/// 每次提交或复位整体替换，从不跨次局部修改。
/// generation 单调递增，用来丢弃复位后迟到的响应。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    pub state: SessionState,
    pub reference: String,
    pub generation: u64,
}

impl ReviewSession {
    fn new() -> Self {
        Self {
            state: SessionState::Idle,
            reference: String::new(),
            generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// 当前成功结果，未完成或失败时为 None。
    /// Some(空列表) 表示审查完成但没有发现问题，和"还没审查"是两回事
    pub fn results(&self) -> Option<&[ReviewComment]> {
        match &self.state {
            SessionState::Success(comments) => Some(comments),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// 已通过校验、等待响应落地的一次提交
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    generation: u64,
}

/// 校验 PR 链接：非空且包含 github.com
pub fn validate_reference(reference: &str) -> Result<(), ReviewError> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || !trimmed.contains(GITHUB_HOST) {
        return Err(ReviewError::validation("请输入有效的 GitHub PR 链接"));
    }
    Ok(())
}

/// 审查请求生命周期控制器
///
/// 持有唯一的会话对象，所有变更都是整状态转换。
/// begin_submit / complete_submit 是纯转换，submit 在两者之间
/// 完成一次后端调用；单一控制流下除 reset 外没有并发修改。
pub struct RequestController {
    backend: Arc<dyn ReviewBackend>,
    session: ReviewSession,
}

impl RequestController {
    pub fn new(backend: Arc<dyn ReviewBackend>) -> Self {
        Self {
            backend,
            session: ReviewSession::new(),
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    /// 提交前的状态转换：记录引用、校验、进入 Loading。
    ///
    /// 返回 None 表示本次提交不产生网络请求：
    /// Loading 中的重复提交是空操作，校验失败直接落到 Failure。
    /// 进入 Loading 的同时旧结果已被清掉，不会和新请求同时存在。
    pub fn begin_submit(&mut self, reference: &str) -> Option<PendingRequest> {
        if self.session.is_loading() {
            debug!("审查请求进行中，忽略重复提交");
            return None;
        }

        self.session.generation += 1;
        self.session.reference = reference.trim().to_string();
        self.session.state = SessionState::Validating;

        if let Err(e) = validate_reference(reference) {
            self.session.state = SessionState::Failure(e.to_string());
            return None;
        }

        self.session.state = SessionState::Loading;
        Some(PendingRequest {
            generation: self.session.generation,
        })
    }

    /// 落地一次提交的结果。只有代际和当前会话一致的响应才生效，
    /// reset 之后迟到的响应在这里被丢弃，不会复活被取代的会话
    pub fn complete_submit(
        &mut self,
        pending: PendingRequest,
        result: Result<Vec<ReviewComment>, ReviewError>,
    ) {
        if pending.generation != self.session.generation {
            debug!(
                stale = pending.generation,
                current = self.session.generation,
                "丢弃过期的审查响应"
            );
            return;
        }

        self.session.state = match result {
            Ok(comments) => SessionState::Success(comments),
            Err(e) => SessionState::Failure(e.to_string()),
        };
    }

    /// 提交一次审查请求。校验失败不触发网络请求；
    /// 请求在途时重复提交是空操作
    pub async fn submit(&mut self, reference: &str) {
        let Some(pending) = self.begin_submit(reference) else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let reference = self.session.reference.clone();
        let result = backend.request_review(&reference).await;

        self.complete_submit(pending, result);
    }

    /// 无条件复位到 Idle，清空引用、结果与错误。
    /// 不取消在途请求，但代际递增保证其结果到达后被丢弃
    pub fn reset(&mut self) {
        self.session.generation += 1;
        self.session.reference.clear();
        self.session.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reference_accepts_github_url() {
        assert!(validate_reference("https://github.com/o/r/pull/1").is_ok());
    }

    #[test]
    fn test_validate_reference_rejects_empty_and_foreign_hosts() {
        assert!(validate_reference("").is_err());
        assert!(validate_reference("   ").is_err());
        assert!(validate_reference("not a url").is_err());
        assert!(validate_reference("https://gitlab.com/o/r/-/merge_requests/1").is_err());
    }

    #[test]
    fn test_validation_error_is_not_retryable() {
        let err = validate_reference("").unwrap_err();
        assert!(!err.is_retryable());
    }
}
