//! 活体验证 WASM 绑定
//!
//! 把 `liveness-engine` 的会话核心编译为 WebAssembly，浏览器端负责采集
//! （FaceMesh 关键点、AnalyserNode 频谱），每帧调用 `processFrame` 得到视图。
//!
//! ## 模块
//! - `options`: 构造参数（JS 对象 → 引擎配置）
//! - `head_rotation`: 头部动作验证（右转 → 左转 → 张嘴）
//! - `breath`: 呼吸验证（吸气 → 呼气），支持环境噪声校准

pub mod breath;
pub mod head_rotation;
pub mod options;

pub use breath::BreathVerifier;
pub use head_rotation::HeadRotationVerifier;

use wasm_bindgen::prelude::*;

/// JS 侧的时间戳是毫秒浮点数（`performance.now()`），负数和 NaN 视为 0
pub(crate) fn to_millis(timestamp: f64) -> u64 {
    if timestamp.is_finite() && timestamp > 0.0 {
        timestamp as u64
    } else {
        0
    }
}

pub(crate) fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
