//! 构造参数
//!
//! JS 侧传入的可选对象，字段缺省时使用引擎默认值：
//!
//! ```js
//! new BreathVerifier({ holdDurationMs: 2000, calibrationWindowMs: 4000 })
//! ```

use liveness_engine::engine::EngineConfig;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifierOptions {
    pub hold_duration_ms: Option<u64>,
    pub turn_threshold_pct: Option<f64>,
    pub mouth_threshold_pct: Option<f64>,
    pub calibration_window_ms: Option<u64>,
}

impl VerifierOptions {
    pub fn into_config(self) -> EngineConfig {
        let mut cfg = EngineConfig::default();
        if let Some(v) = self.hold_duration_ms {
            cfg.hold_duration_ms = v;
        }
        if let Some(v) = self.turn_threshold_pct {
            cfg.head.turn_threshold_pct = v;
        }
        if let Some(v) = self.mouth_threshold_pct {
            cfg.head.mouth_threshold_pct = v;
        }
        if let Some(v) = self.calibration_window_ms {
            cfg.calibration.window_ms = v;
        }
        cfg
    }
}

/// `undefined` / `null` 使用默认配置
pub(crate) fn parse(options: JsValue) -> Result<EngineConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(EngineConfig::default());
    }
    let opts: VerifierOptions =
        serde_wasm_bindgen::from_value(options).map_err(crate::js_error)?;
    Ok(opts.into_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let cfg = VerifierOptions {
            hold_duration_ms: Some(1500),
            ..Default::default()
        }
        .into_config();
        let defaults = EngineConfig::default();
        assert_eq!(cfg.hold_duration_ms, 1500);
        assert_eq!(cfg.head.turn_threshold_pct, defaults.head.turn_threshold_pct);
        assert_eq!(cfg.calibration.window_ms, defaults.calibration.window_ms);
    }
}
