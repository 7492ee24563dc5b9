//! 应用配置常量
//!
//! 集中管理路径前缀、存储键名、选择器等魔法值，
//! 避免散落在各个模块中。

/// 应用部署的基础路径前缀（部署在域名根目录时为空）
pub const BASE_PATH: &str = "";

/// 视图内容挂载点的选择器（服务端页面与 SPA 共用）
pub const VIEW_ROOT_SELECTOR: &str = "#app-view";

/// 课程详情共享模板的拉取地址（所有课程共用同一结构）
pub const COURSE_TEMPLATE_URL: &str = "/templates/course-detail.html";

/// 后端 API 基础路径
pub const API_BASE: &str = "/api";

/// SessionStorage: 时段预填充载荷的键名（由"提议时段"协作方写入）
pub const SLOT_PREFILTER_KEY: &str = "ila_home_slot_prefilter";

/// 时段预填充载荷的最大有效期（10 分钟，毫秒）
pub const SLOT_PREFILTER_TTL_MILLIS: u64 = 10 * 60 * 1000;

/// SessionStorage: 作业页重定向原因标记的键名
pub const ASSIGNMENTS_GATE_KEY: &str = "ila_assignments_gate_reason";

/// 课程列表页的年份选择器 id
pub const YEAR_SELECT_ID: &str = "year-select";

/// 课程列表页的学期选择器 id
pub const TERM_SELECT_ID: &str = "term-select";

/// 可复用视图碎片（自定义元素风格）的标记选择器
pub const FRAGMENT_SELECTOR: &str = "[data-ila-fragment]";

/// 模态浮层的选择器（固定清理步骤统一移除）
pub const MODAL_OVERLAY_SELECTOR: &str = ".modal-overlay";

/// body 上的"模态打开"标记 class
pub const BODY_MODAL_FLAG: &str = "modal-open";

/// body 上的"课程详情模式"标记 class
pub const BODY_COURSE_FLAG: &str = "course-mode";

/// body 上的"访客布局"标记 class（首页未登录变体）
pub const BODY_GUEST_FLAG: &str = "guest";
