use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 导航错误状态枚举
/// 对应错误的语义分类，决定调度器的降级策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavErrorStatus {
    /// 路由表中不存在的路径（软失败：停留在原视图）
    NotFound,
    /// 视图标记拉取失败（网络层）
    Network,
    /// 会话探测失败（一律按未认证处理）
    Session,
    /// SessionStorage 读写失败
    Storage,
    /// JSON 解析或序列化错误
    Serialization,
    /// 文档树操作失败（挂载点缺失等）
    Dom,
}

impl NavErrorStatus {
    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            NavErrorStatus::NotFound => "ROUTE_NOT_FOUND",
            NavErrorStatus::Network => "FETCH_FAILED",
            NavErrorStatus::Session => "SESSION_PROBE_FAILED",
            NavErrorStatus::Storage => "STORAGE_ERROR",
            NavErrorStatus::Serialization => "JSON_PARSE_ERROR",
            NavErrorStatus::Dom => "DOM_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 导航核心错误
///
/// 高内聚的错误定义：
/// - status: 错误语义分类
/// - message: 错误消息
/// - ops: 操作追踪（最外层操作在最后）
#[derive(Debug)]
pub struct NavError {
    pub status: NavErrorStatus,
    pub message: String,
    /// 结构化的操作追踪，如 "fetch.view" / "storage.get"
    ops: Vec<String>,
}

impl NavError {
    pub fn new(status: NavErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ops: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(NavErrorStatus::NotFound, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(NavErrorStatus::Network, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(NavErrorStatus::Session, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(NavErrorStatus::Storage, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(NavErrorStatus::Serialization, message)
    }

    pub fn dom(message: impl Into<String>) -> Self {
        Self::new(NavErrorStatus::Dom, message)
    }

    // --- Context builder ---

    /// 追加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.ops.push(operation.into());
        self
    }

    /// 获取机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.ops.is_empty() {
            write!(f, " | trace: ")?;
            for (i, op) in self.ops.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", op)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for NavError {}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        NavError::serialization(e.to_string())
    }
}

pub type NavResult<T> = std::result::Result<T, NavError>;
