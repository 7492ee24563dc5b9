//! 页面标记缓存
//!
//! 进程级缓存：规范路径 -> 首次成功拉取的视图标记。
//! 会话期内永不淘汰；条目创建后除 `initialized_once` 外不再修改。

use std::collections::HashMap;

/// 课程详情共享模板在缓存中的固定哨兵键
pub const COURSE_DETAIL_KEY: &str = "__course_detail__";

struct CacheEntry {
    markup: String,
    initialized_once: bool,
}

/// 页面缓存
#[derive(Default)]
pub struct PageCache {
    entries: HashMap<String, CacheEntry>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按规范路径取出缓存的视图标记
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.markup.as_str())
    }

    /// 写入缓存：每个路径仅在首次成功拉取时调用一次
    pub fn insert(&mut self, key: &str, markup: String) {
        self.entries.entry(key.to_string()).or_insert(CacheEntry {
            markup,
            initialized_once: false,
        });
    }

    /// 课程详情共享模板（与 `{code, year, term}` 无关的单一槽位）
    pub fn course_template(&self) -> Option<&str> {
        self.get(COURSE_DETAIL_KEY)
    }

    pub fn set_course_template(&mut self, markup: String) {
        self.insert(COURSE_DETAIL_KEY, markup);
    }

    /// 标记该键已完成过一次初始化
    ///
    /// 返回 `true` 表示这是首次（供初始化协作方区分一次性装配）。
    /// 键不存在时视为首次（预渲染入口未入缓存的保守处理）。
    pub fn mark_initialized(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                let first = !entry.initialized_once;
                entry.initialized_once = true;
                first
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = PageCache::new();
        assert!(cache.get("/courses").is_none());
        cache.insert("/courses", "<div>a</div>".into());
        assert_eq!(cache.get("/courses"), Some("<div>a</div>"));
        // First write wins; entries are never mutated afterwards
        cache.insert("/courses", "<div>b</div>".into());
        assert_eq!(cache.get("/courses"), Some("<div>a</div>"));
    }

    #[test]
    fn test_course_template_slot_is_independent() {
        let mut cache = PageCache::new();
        cache.set_course_template("<article/>".into());
        assert_eq!(cache.course_template(), Some("<article/>"));
        assert!(cache.get("/courses").is_none());
    }

    #[test]
    fn test_mark_initialized_reports_first_visit() {
        let mut cache = PageCache::new();
        cache.insert("/courses", "x".into());
        assert!(cache.mark_initialized("/courses"));
        assert!(!cache.mark_initialized("/courses"));
        // Unknown keys count as a first visit
        assert!(cache.mark_initialized("/never-cached"));
    }
}
