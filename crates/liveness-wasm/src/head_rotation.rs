//! 头部动作验证
//!
//! 输入为 FaceMesh 的扁平化关键点数组 `[x0, y0, x1, y1, ...]`（归一化坐标），
//! 取其中的眼角、鼻尖、上下唇点。空数组或点数不足表示本帧未检测到人脸，
//! 会让当前任务的保持计时归零。

use liveness_engine::engine::types::{
    CaptureFailure, FaceLandmarks, FeatureSnapshot, SessionView,
};
use liveness_engine::engine::{EngineConfig, Session};
use liveness_engine::LivenessError;
use wasm_bindgen::prelude::*;

use crate::{js_error, options, to_js, to_millis};

/// 头部动作验证器：右转 → 左转 → 张嘴，每项保持满足条件直到进度满
#[wasm_bindgen]
pub struct HeadRotationVerifier {
    session: Session,
}

#[wasm_bindgen]
impl HeadRotationVerifier {
    /// # 参数
    /// - `options`: 可选配置对象，见 `VerifierOptions`
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<HeadRotationVerifier, JsValue> {
        let config = options::parse(options)?;
        Self::with_config(config).map_err(js_error)
    }

    /// 处理一帧关键点
    ///
    /// # 参数
    /// - `mesh`: 扁平化关键点坐标
    /// - `timestamp`: 当前时间戳（毫秒）
    ///
    /// # 返回
    /// 序列化为 JsValue 的 SessionView
    #[wasm_bindgen(js_name = "processFrame")]
    pub fn process_frame(&mut self, mesh: &[f64], timestamp: f64) -> JsValue {
        to_js(&self.apply_mesh(mesh, timestamp))
    }

    /// 摄像头已就绪
    #[wasm_bindgen(js_name = "captureStarted")]
    pub fn capture_started(&mut self) {
        self.session.capture_started();
    }

    /// 摄像头不可用，返回对应的 Error 供页面展示
    #[wasm_bindgen(js_name = "captureFailed")]
    pub fn capture_failed(&mut self, permission_denied: bool, reason: Option<String>) -> JsValue {
        let failure = if permission_denied {
            CaptureFailure::PermissionDenied
        } else {
            CaptureFailure::DeviceUnavailable {
                reason: reason.unwrap_or_else(|| "camera unavailable".to_string()),
            }
        };
        js_error(self.session.capture_failed(failure))
    }

    #[wasm_bindgen(js_name = "isComplete")]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[wasm_bindgen(js_name = "activeIndex")]
    pub fn active_index(&self) -> usize {
        self.session.active_index()
    }

    /// 当前视图
    pub fn view(&self) -> JsValue {
        to_js(&self.session.view())
    }

    /// 重新开始，保留配置
    pub fn reset(&mut self) -> Result<(), JsValue> {
        let config = self.session.config().clone();
        self.session = Session::head_rotation(config).map_err(js_error)?;
        Ok(())
    }
}

impl HeadRotationVerifier {
    pub fn with_config(config: EngineConfig) -> Result<Self, LivenessError> {
        Ok(Self {
            session: Session::head_rotation(config)?,
        })
    }

    /// 扁平网格 → 特征帧 → 会话视图
    pub fn apply_mesh(&mut self, mesh: &[f64], timestamp: f64) -> SessionView {
        let frame = FeatureSnapshot::Face(FaceLandmarks::from_flat_mesh(mesh));
        self.session.process_frame(&frame, to_millis(timestamp))
    }
}
