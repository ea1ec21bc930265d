/// 감사 로그 (Audit Trail)
///
/// 계정과 리소스에 대한 변경 작업을 구조화된 로그로 남깁니다.
/// 별도 저장소 없이 tracing 파이프라인으로 내보냅니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 감사 로그 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    /// 로그 ID
    pub log_id: String,
    /// 타임스탬프
    pub timestamp: DateTime<Utc>,
    /// 작업 유형 (REGISTER, LOGIN, CREATE, UPDATE, DELETE 등)
    pub action: String,
    /// 리소스 유형 (user, transaction, category, recurring_transaction, goal)
    pub resource_type: String,
    /// 리소스 ID
    pub resource_id: Option<String>,
    /// 사용자 ID
    pub user_id: Option<String>,
    /// 상태 (SUCCESS, FAILURE)
    pub status: String,
    /// 상세 메시지
    pub message: String,
}

impl AuditLog {
    pub fn new(action: &str, resource_type: &str, status: &str, message: &str) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            action: action.to_string(),
            resource_type: resource_type.to_string(),
            resource_id: None,
            user_id: None,
            status: status.to_string(),
            message: message.to_string(),
        }
    }

    pub fn with_resource_id(mut self, id: String) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// 감사 로그 기록
pub fn log_audit(audit_log: &AuditLog) {
    if audit_log.status == "FAILURE" {
        tracing::warn!(
            log_id = %audit_log.log_id,
            action = %audit_log.action,
            resource_type = %audit_log.resource_type,
            resource_id = ?audit_log.resource_id,
            user_id = ?audit_log.user_id,
            status = %audit_log.status,
            message = %audit_log.message,
            "Audit log entry"
        );
    } else {
        tracing::info!(
            log_id = %audit_log.log_id,
            action = %audit_log.action,
            resource_type = %audit_log.resource_type,
            resource_id = ?audit_log.resource_id,
            user_id = ?audit_log.user_id,
            status = %audit_log.status,
            message = %audit_log.message,
            "Audit log entry"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log_creation() {
        let audit_log = AuditLog::new("CREATE", "transaction", "SUCCESS", "Transaction created")
            .with_resource_id("tx-123".to_string())
            .with_user_id("user-456".to_string());

        assert_eq!(audit_log.action, "CREATE");
        assert_eq!(audit_log.resource_type, "transaction");
        assert_eq!(audit_log.resource_id, Some("tx-123".to_string()));
        assert_eq!(audit_log.user_id, Some("user-456".to_string()));
    }

    #[test]
    fn test_audit_log_serializes_timestamp() {
        let audit_log = AuditLog::new("LOGIN", "user", "FAILURE", "Bad credentials");
        let json = serde_json::to_value(&audit_log).unwrap();

        assert!(json["timestamp"].is_string());
        assert_eq!(json["status"], "FAILURE");
    }
}
