//! 跨导航状态保持
//!
//! 两类状态：课程列表页的年份/学期选择（内存内，导航间保持），
//! 以及"提议时段"协作方经会话级存储投递的预填充载荷（带 10 分钟有效期）。
//! 搜索文本与筛选勾选是刻意不保持的。

use serde::{Deserialize, Serialize};

use crate::config;
use crate::logging;
use crate::nav::adapter::{Clock, SessionStore};

/// 课程列表页的选择器状态
///
/// 离开课程列表前捕获，重新挂载后恢复；只由显式的保存/恢复调用修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursesPageState {
    pub year: Option<u16>,
    pub term: Option<String>,
}

impl CoursesPageState {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.term.is_none()
    }
}

/// 时段预填充载荷（跨视图信箱）
///
/// 由外部"提议时段"协作方写入会话级存储，课程列表初始化协作方消费。
/// 核心不负责删除该键（见 DESIGN.md 的遗留语义说明）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPrefilterPayload {
    pub day: String,
    pub term: String,
    pub year: u16,
    /// 写入时刻（毫秒级 Unix 时间）
    pub created_at: u64,
}

impl SlotPrefilterPayload {
    /// 载荷是否仍在 10 分钟有效期内
    pub fn is_fresh(&self, now_millis: u64) -> bool {
        now_millis.saturating_sub(self.created_at) <= config::SLOT_PREFILTER_TTL_MILLIS
    }
}

/// 读取未过期的时段预填充载荷
///
/// 缺失、解析失败、超龄一律视为不存在，不向用户暴露错误。
pub fn load_slot_prefilter<K, C>(store: &K, clock: &C) -> Option<SlotPrefilterPayload>
where
    K: SessionStore,
    C: Clock,
{
    let raw = store.get(config::SLOT_PREFILTER_KEY)?;
    let payload: SlotPrefilterPayload = match serde_json::from_str(&raw) {
        Ok(p) => p,
        Err(e) => {
            logging::warn(&format!("[State] 预填充载荷解析失败，按缺失处理: {}", e));
            return None;
        }
    };
    payload.is_fresh(clock.now_millis()).then_some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemStore {
        map: RefCell<HashMap<String, String>>,
    }

    impl SessionStore for MemStore {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) -> bool {
            self.map.borrow_mut().insert(key.into(), value.into());
            true
        }
        fn remove(&self, key: &str) -> bool {
            self.map.borrow_mut().remove(key).is_some()
        }
    }

    struct FixedClock(Cell<u64>);

    impl Clock for FixedClock {
        fn now_millis(&self) -> u64 {
            self.0.get()
        }
    }

    const MINUTE: u64 = 60 * 1000;

    fn stash(store: &MemStore, created_at: u64) {
        let payload = SlotPrefilterPayload {
            day: "wednesday".into(),
            term: "fall".into(),
            year: 2025,
            created_at,
        };
        store.set(
            config::SLOT_PREFILTER_KEY,
            &serde_json::to_string(&payload).unwrap(),
        );
    }

    #[test]
    fn test_fresh_payload_is_honored() {
        let store = MemStore::default();
        let clock = FixedClock(Cell::new(20 * MINUTE));
        // Written 9 minutes ago
        stash(&store, 11 * MINUTE);

        let payload = load_slot_prefilter(&store, &clock).expect("payload should be fresh");
        assert_eq!(payload.day, "wednesday");
        assert_eq!(payload.year, 2025);
        // Consumption does not delete the key
        assert!(store.get(config::SLOT_PREFILTER_KEY).is_some());
    }

    #[test]
    fn test_stale_payload_is_absent() {
        let store = MemStore::default();
        let clock = FixedClock(Cell::new(20 * MINUTE));
        // Written 11 minutes ago
        stash(&store, 9 * MINUTE);
        assert!(load_slot_prefilter(&store, &clock).is_none());
    }

    #[test]
    fn test_garbage_payload_is_absent() {
        let store = MemStore::default();
        let clock = FixedClock(Cell::new(MINUTE));
        store.set(config::SLOT_PREFILTER_KEY, "{not json");
        assert!(load_slot_prefilter(&store, &clock).is_none());
    }

    #[test]
    fn test_missing_key_is_absent() {
        let store = MemStore::default();
        let clock = FixedClock(Cell::new(MINUTE));
        assert!(load_slot_prefilter(&store, &clock).is_none());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let payload = SlotPrefilterPayload {
            day: "monday".into(),
            term: "spring".into(),
            year: 2026,
            created_at: 42,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"createdAt\":42"), "wire format: {}", json);
    }
}
