//! 日志输出封装
//!
//! wasm32 环境写入浏览器 console，原生环境（测试）写入 stderr，
//! 与 panic hook 相同的 cfg 切分方式。

/// 普通信息日志
pub fn info(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[info] {}", msg);
}

/// 警告日志（可恢复的降级路径）
pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[warn] {}", msg);
}

/// 错误日志（已捕获、不再向上传播的失败）
pub fn error(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&msg.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[error] {}", msg);
}
