//! 导航核心引擎
//!
//! 平台无关的导航/生命周期核心：路径规范化与路由表（`route`）、
//! 页面缓存（`cache`）、清理注册表（`cleanup`）、类型化事件总线（`bus`）、
//! 跨导航状态保持（`state`），由 `router` 中的调度器统一编排。
//! 浏览器副作用全部经由 `adapter` 中的接口注入。

pub mod adapter;
pub mod bus;
pub mod cache;
pub mod cleanup;
pub mod route;
pub mod router;
pub mod state;
