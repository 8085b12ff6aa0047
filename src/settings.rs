//! Player settings and preferences
//!
//! Kept in memory for the session; a host may round-trip them as JSON.

use serde::{Deserialize, Serialize};

/// Sensitivity slider bounds and step
pub const MIN_SENSITIVITY: f32 = 0.5;
pub const MAX_SENSITIVITY: f32 = 2.0;
pub const SENSITIVITY_STEP: f32 = 0.1;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Player rotation speed multiplier
    pub sensitivity: f32,
    /// Music muted
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no pulse scaling, no background flicker)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Snap a slider value onto the 0.1 grid within [0.5, 2.0]
    pub fn clamp_sensitivity(value: f32) -> f32 {
        if !value.is_finite() {
            return 1.0;
        }
        let snapped = (value / SENSITIVITY_STEP).round() * SENSITIVITY_STEP;
        snapped.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
    }

    pub fn set_sensitivity(&mut self, value: f32) {
        self.sensitivity = Self::clamp_sensitivity(value);
    }

    /// Slider label, e.g. "1.3x"
    pub fn sensitivity_label(&self) -> String {
        format!("{:.1}x", self.sensitivity)
    }

    /// Decode settings from a host, sanitising the slider value
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sensitivity = Self::clamp_sensitivity(settings.sensitivity);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
