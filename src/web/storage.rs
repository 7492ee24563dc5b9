//! SessionStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的会话级存储接口，
//! 并向导航核心暴露 `SessionStore` / `Clock` 适配器绑定。

use crate::nav::adapter::{Clock, SessionStore};

/// 会话级存储操作封装
///
/// 提供静态方法访问浏览器 SessionStorage API。
pub struct SessionStorage;

impl SessionStorage {
    /// 获取 SessionStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值
    ///
    /// # 返回
    /// - `true` 如果操作成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 导航核心的会话存储适配器绑定
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::get(key)
    }
    fn set(&self, key: &str, value: &str) -> bool {
        SessionStorage::set(key, value)
    }
    fn remove(&self, key: &str) -> bool {
        SessionStorage::delete(key)
    }
}

/// 毫秒时钟适配器（`Date.now()`）
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}
