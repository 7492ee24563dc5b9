//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义路径规范化、路由表、课程详情深链模式与受保护路径集合。

use crate::config;

/// 视图模板标识
///
/// 路由表的取值端：每个规范路径映射到一个模板。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    /// 首页（入口视图，可能随文档预渲染）
    Home,
    /// 课程列表（入口视图，可能随文档预渲染）
    Courses,
    /// 校历（需要认证）
    Calendar,
    /// 作业（需要认证）
    Assignments,
    /// 个人中心（需要认证）
    Profile,
    /// 登录页
    Login,
}

impl TemplateId {
    /// 模板对应的页面文档拉取路径
    ///
    /// 服务端按路径返回完整 HTML 文档，拉取后由加载器抽取视图内容。
    pub fn source_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Courses => "/courses",
            Self::Calendar => "/calendar",
            Self::Assignments => "/assignments",
            Self::Profile => "/profile",
            Self::Login => "/login",
        }
    }

    /// 页面展示名称（锁定视图的文案复用此名称）
    pub fn page_title(&self) -> &'static str {
        match self {
            Self::Home => "首页",
            Self::Courses => "课程",
            Self::Calendar => "校历",
            Self::Assignments => "作业",
            Self::Profile => "个人中心",
            Self::Login => "登录",
        }
    }
}

/// 课程详情深链引用
///
/// 由课程详情模式解析得到，不参与普通路由表查找。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRef {
    pub code: String,
    pub year: u16,
    pub term: String,
}

/// 解析课程详情模式 `^/courses?/<code>/<4位年份>/<term>$`
///
/// 返回 `None` 表示路径不符合该模式（如年份不是 4 位数字）。
pub fn parse_course_detail(path: &str) -> Option<CourseRef> {
    let mut segments = path.strip_prefix('/')?.split('/');

    let head = segments.next()?;
    if head != "course" && head != "courses" {
        return None;
    }

    let code = segments.next()?;
    let year = segments.next()?;
    let term = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    if code.is_empty() || term.is_empty() {
        return None;
    }
    // 年份必须恰好 4 位数字
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(CourseRef {
        code: code.to_string(),
        year: year.parse().ok()?,
        term: term.to_string(),
    })
}

/// **路径规范化：`extract_base_path`**
///
/// 流程：去查询串/片段 -> 去部署前缀 -> 折叠尾部斜杠 ->
/// 课程详情模式原样放行 -> 已知路径族改写为规范代表。
///
/// 幂等：对结果再次应用不会产生变化。
pub fn extract_base_path(raw: &str) -> String {
    normalize_with_base(raw, config::BASE_PATH)
}

fn normalize_with_base(raw: &str, base: &str) -> String {
    // 1. 去掉查询串与片段
    let mut path = raw;
    if let Some(i) = path.find(['?', '#']) {
        path = &path[..i];
    }

    // 2. 去掉部署前缀（只在段边界上剥离）
    if !base.is_empty() {
        if let Some(rest) = path.strip_prefix(base) {
            if rest.is_empty() || rest.starts_with('/') {
                path = rest;
            }
        }
    }
    if path.is_empty() {
        path = "/";
    }

    // 3. 折叠单个尾部斜杠（根路径保留）
    if path.len() > 1 {
        path = path.strip_suffix('/').unwrap_or(path);
    }

    // 4. 课程详情模式由专用加载器处理，绕过常规规范化
    if parse_course_detail(path).is_some() {
        return path.to_string();
    }

    // 5. 已知路径族改写为规范代表
    if path == "/" || path == "/home" || path == "/index" {
        return "/".to_string();
    }
    if path == "/profile" || path.starts_with("/profile/") {
        return "/profile".to_string();
    }
    if path == "/courses" || path.starts_with("/courses/") || path.starts_with("/dashboard") {
        return "/courses".to_string();
    }
    if path == "/calendar" || path.starts_with("/calendar/") {
        return "/calendar".to_string();
    }

    path.to_string()
}

/// 路由表：规范路径 -> 模板标识
///
/// 课程详情模式应在调用本函数之前单独检查。
/// 查不到时返回 `None`，由调度器记录日志并中止本次导航（软失败）。
pub fn resolve(canonical: &str) -> Option<TemplateId> {
    match canonical {
        "/" => Some(TemplateId::Home),
        "/courses" => Some(TemplateId::Courses),
        "/calendar" => Some(TemplateId::Calendar),
        "/assignments" => Some(TemplateId::Assignments),
        "/profile" => Some(TemplateId::Profile),
        "/login" => Some(TemplateId::Login),
        _ => None,
    }
}

/// 受保护路径集合（进程生命周期内固定）
const PROTECTED_PATHS: [&str; 3] = ["/calendar", "/assignments", "/profile"];

/// 纯集合成员检查：路径是否受认证门控
pub fn is_protected(canonical: &str) -> bool {
    PROTECTED_PATHS.contains(&canonical)
}

/// 未认证访问受保护视图时的处置策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePolicy {
    /// 渲染通用锁定视图（复用页面名称文案），不拉取真实视图
    Lock,
    /// 重定向到登录页
    RedirectLogin,
    /// 写入原因标记后重定向到个人中心
    RedirectProfile,
}

/// 获取模板的门控策略；`None` 表示无需门控
pub fn gate_policy(template: TemplateId) -> Option<GatePolicy> {
    match template {
        TemplateId::Calendar => Some(GatePolicy::Lock),
        TemplateId::Profile => Some(GatePolicy::RedirectLogin),
        TemplateId::Assignments => Some(GatePolicy::RedirectProfile),
        _ => None,
    }
}

/// 在 History 栈中始终携带尾部斜杠的顶级路径集合
///
/// 避免 `/courses` 与 `/courses/` 成为指向同一视图的两条历史记录。
const TRAILING_SLASH_PATHS: [&str; 5] = [
    "/courses",
    "/calendar",
    "/assignments",
    "/profile",
    "/login",
];

/// 规范路径在地址栏/历史栈中的展示形式
pub fn history_display_path(canonical: &str) -> String {
    if TRAILING_SLASH_PATHS.contains(&canonical) {
        format!("{}{}/", config::BASE_PATH, canonical)
    } else {
        format!("{}{}", config::BASE_PATH, canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "/",
            "/home/",
            "/index",
            "/courses?year=2025#top",
            "/courses/archive/",
            "/dashboard/anything",
            "/profile/settings/privacy",
            "/calendar/week",
            "/course/academic_writing_101/2025/fall",
            "/login/",
            "/unknown/path",
        ];
        for p in samples {
            let once = extract_base_path(p);
            let twice = extract_base_path(&once);
            assert_eq!(once, twice, "normalize not idempotent for {}", p);
        }
    }

    #[test]
    fn test_alias_convergence() {
        let target = extract_base_path("/courses");
        assert_eq!(extract_base_path("/dashboard"), target);
        assert_eq!(extract_base_path("/dashboard/"), target);
        assert_eq!(extract_base_path("/dashboard/anything"), target);
    }

    #[test]
    fn test_home_family() {
        assert_eq!(extract_base_path("/home"), "/");
        assert_eq!(extract_base_path("/home/"), "/");
        assert_eq!(extract_base_path("/index"), "/");
        assert_eq!(extract_base_path("/index/"), "/");
        assert_eq!(extract_base_path("/"), "/");
    }

    #[test]
    fn test_query_and_fragment_stripped() {
        assert_eq!(extract_base_path("/calendar?week=12"), "/calendar");
        assert_eq!(extract_base_path("/profile#reviews"), "/profile");
    }

    #[test]
    fn test_base_prefix_stripped() {
        assert_eq!(normalize_with_base("/ila/courses/", "/ila"), "/courses");
        assert_eq!(normalize_with_base("/ila", "/ila"), "/");
        // Paths outside the prefix pass through untouched
        assert_eq!(normalize_with_base("/courses", "/ila"), "/courses");
    }

    #[test]
    fn test_course_detail_extraction() {
        let r = parse_course_detail("/course/academic_writing_101/2025/fall").unwrap();
        assert_eq!(r.code, "academic_writing_101");
        assert_eq!(r.year, 2025);
        assert_eq!(r.term, "fall");

        // Plural form matches too
        assert!(parse_course_detail("/courses/linear_algebra/2024/spring").is_some());

        // 2-digit year does not match the pattern
        assert!(parse_course_detail("/courses/xyz/99/fall").is_none());
        // Non-numeric year
        assert!(parse_course_detail("/course/xyz/20a5/fall").is_none());
        // Missing term
        assert!(parse_course_detail("/course/xyz/2025").is_none());
        // Extra segment
        assert!(parse_course_detail("/course/xyz/2025/fall/extra").is_none());
    }

    #[test]
    fn test_course_detail_bypasses_rewrite() {
        let deep = "/courses/linear_algebra/2024/spring";
        assert_eq!(extract_base_path(deep), deep);
        // A trailing slash collapses first, then the pattern still matches
        assert_eq!(
            extract_base_path("/courses/linear_algebra/2024/spring/"),
            deep
        );
        // Near-misses fall back into the /courses family
        assert_eq!(extract_base_path("/courses/xyz/99/fall"), "/courses");
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(resolve("/"), Some(TemplateId::Home));
        assert_eq!(resolve("/courses"), Some(TemplateId::Courses));
        assert_eq!(resolve("/calendar"), Some(TemplateId::Calendar));
        assert_eq!(resolve("/assignments"), Some(TemplateId::Assignments));
        assert_eq!(resolve("/profile"), Some(TemplateId::Profile));
        assert_eq!(resolve("/login"), Some(TemplateId::Login));
        assert_eq!(resolve("/nope"), None);
    }

    #[test]
    fn test_protected_set() {
        assert!(is_protected("/calendar"));
        assert!(is_protected("/assignments"));
        assert!(is_protected("/profile"));
        assert!(!is_protected("/"));
        assert!(!is_protected("/courses"));
        assert!(!is_protected("/login"));
        // Every protected path must also resolve in the route table
        for p in PROTECTED_PATHS {
            assert!(resolve(p).is_some(), "protected path {} not routable", p);
        }
    }

    #[test]
    fn test_history_display_path() {
        assert_eq!(history_display_path("/courses"), "/courses/");
        assert_eq!(history_display_path("/login"), "/login/");
        assert_eq!(history_display_path("/"), "/");
        assert_eq!(
            history_display_path("/course/abc/2025/fall"),
            "/course/abc/2025/fall"
        );
    }
}
