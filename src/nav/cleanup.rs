//! 清理注册表
//!
//! 视图初始化协作方注册的卸载回调在下一次导航转换开始时统一执行。
//! 单个回调失败只记录日志，不阻断其余回调（一个坏视图不应拖垮整个转换）。

use std::cell::RefCell;

use crate::error::NavResult;
use crate::logging;

/// 卸载回调类型（可失败）
pub type CleanupFn = Box<dyn FnOnce() -> NavResult<()>>;

/// 清理注册表：每次导航转换排空一次
#[derive(Default)]
pub struct CleanupRegistry {
    fns: RefCell<Vec<CleanupFn>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个卸载回调
    pub fn register(&self, f: impl FnOnce() -> NavResult<()> + 'static) {
        self.fns.borrow_mut().push(Box::new(f));
    }

    /// 执行并清空所有已注册的回调
    pub fn run(&self) {
        let fns = std::mem::take(&mut *self.fns.borrow_mut());
        for f in fns {
            if let Err(e) = f() {
                logging::warn(&format!("[Cleanup] 卸载回调失败: {}", e));
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fns.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_run_drains_registry() {
        let registry = CleanupRegistry::new();
        let hits = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            registry.register(move || {
                hits.set(hits.get() + 1);
                Ok(())
            });
        }
        registry.run();
        assert_eq!(hits.get(), 3);
        assert_eq!(registry.len(), 0);

        // A second run is a no-op
        registry.run();
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_failure_does_not_block_the_rest() {
        let registry = CleanupRegistry::new();
        let hits = Rc::new(Cell::new(0));

        registry.register(|| Err(NavError::dom("detached node")));
        {
            let hits = hits.clone();
            registry.register(move || {
                hits.set(hits.get() + 1);
                Ok(())
            });
        }
        registry.run();
        assert_eq!(hits.get(), 1);
    }
}
