//! 呼吸验证
//!
//! 输入为 AnalyserNode 的幅度频谱（`getFloatFrequencyData` 转线性后的
//! Float32Array）及采样率。先可选地做一次环境噪声校准，再依次完成
//! 吸气、呼气两个任务。

use liveness_engine::engine::types::{AudioSpectrum, CaptureFailure, FeatureSnapshot, SessionView};
use liveness_engine::engine::{EngineConfig, Session};
use liveness_engine::LivenessError;
use wasm_bindgen::prelude::*;

use crate::{js_error, options, to_js, to_millis};

#[wasm_bindgen]
pub struct BreathVerifier {
    session: Session,
}

#[wasm_bindgen]
impl BreathVerifier {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<BreathVerifier, JsValue> {
        let config = options::parse(options)?;
        Self::with_config(config).map_err(js_error)
    }

    /// 处理一帧频谱
    ///
    /// # 参数
    /// - `spectrum`: 各频点幅度
    /// - `sample_rate`: 音频采样率（Hz）
    /// - `timestamp`: 当前时间戳（毫秒）
    #[wasm_bindgen(js_name = "processFrame")]
    pub fn process_frame(&mut self, spectrum: &[f32], sample_rate: f64, timestamp: f64) -> JsValue {
        to_js(&self.apply_spectrum(spectrum, sample_rate, timestamp))
    }

    /// 开始环境噪声校准，返回窗口截止时间戳（毫秒）
    ///
    /// 窗口到期后的第一帧会自动结算；页面也可以在截止时调用 `finishCalibration`。
    #[wasm_bindgen(js_name = "startCalibration")]
    pub fn start_calibration(&mut self, timestamp: f64) -> Result<f64, JsValue> {
        self.session
            .start_calibration(to_millis(timestamp))
            .map(|deadline| deadline as f64)
            .map_err(js_error)
    }

    /// 结束校准，返回 CalibrationOutcome；不在校准中时返回 null
    #[wasm_bindgen(js_name = "finishCalibration")]
    pub fn finish_calibration(&mut self, timestamp: f64) -> JsValue {
        match self.session.finish_calibration(to_millis(timestamp)) {
            Some(outcome) => to_js(&outcome),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = "isCalibrating")]
    pub fn is_calibrating(&self) -> bool {
        self.session.is_calibrating()
    }

    #[wasm_bindgen(js_name = "captureStarted")]
    pub fn capture_started(&mut self) {
        self.session.capture_started();
    }

    /// 麦克风不可用，返回对应的 Error 供页面展示
    #[wasm_bindgen(js_name = "captureFailed")]
    pub fn capture_failed(&mut self, permission_denied: bool, reason: Option<String>) -> JsValue {
        let failure = if permission_denied {
            CaptureFailure::PermissionDenied
        } else {
            CaptureFailure::DeviceUnavailable {
                reason: reason.unwrap_or_else(|| "microphone unavailable".to_string()),
            }
        };
        js_error(self.session.capture_failed(failure))
    }

    #[wasm_bindgen(js_name = "isComplete")]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    pub fn view(&self) -> JsValue {
        to_js(&self.session.view())
    }

    /// 重新开始；校准得到的阈值一并丢弃
    pub fn reset(&mut self) -> Result<(), JsValue> {
        let config = self.session.config().clone();
        self.session = Session::breath(config).map_err(js_error)?;
        Ok(())
    }
}

impl BreathVerifier {
    pub fn with_config(config: EngineConfig) -> Result<Self, LivenessError> {
        Ok(Self {
            session: Session::breath(config)?,
        })
    }

    /// Float32 频谱 → 特征帧 → 会话视图
    pub fn apply_spectrum(&mut self, spectrum: &[f32], sample_rate: f64, timestamp: f64) -> SessionView {
        let frame = FeatureSnapshot::Spectrum(AudioSpectrum {
            bins: spectrum.iter().map(|&v| f64::from(v)).collect(),
            sample_rate,
        });
        self.session.process_frame(&frame, to_millis(timestamp))
    }
}

#[cfg(test)]
mod tests {
    use liveness_engine::engine::types::{Readout, ThresholdSet};

    use super::*;

    #[test]
    fn spectrum_frames_feed_calibration() {
        let mut verifier = BreathVerifier::with_config(EngineConfig::default()).unwrap();
        let deadline = verifier.session.start_calibration(0).unwrap();
        for t in [100.0, 200.0, 300.0] {
            let view = verifier.apply_spectrum(&[0.5; 512], 44_100.0, t);
            assert!(view.calibrating);
        }
        verifier.session.finish_calibration(deadline).expect("was calibrating");
        match verifier.session.thresholds() {
            ThresholdSet::Breath(t) => assert!((t.breath - 0.6).abs() < 1e-6),
            other => panic!("unexpected thresholds {other:?}"),
        }
    }

    #[test]
    fn tiny_sample_rate_is_harmless() {
        let mut verifier = BreathVerifier::with_config(EngineConfig::default()).unwrap();
        let view = verifier.apply_spectrum(&[0.1; 512], 1e-20, 0.0);
        match view.readout {
            Readout::Breath { intensity, .. } => assert!(intensity.is_finite()),
            other => panic!("unexpected readout {other:?}"),
        }
    }
}
