//! Light rigs placed around the network

use crate::geometry::Vec3;
use crate::intensity::Rgba;
use serde::{Deserialize, Serialize};

/// Named lighting setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingPreset {
    /// Blue point light with a violet ambient.
    #[default]
    Cool,
    /// Orange point light with a brown ambient.
    Warm,
    /// No lights; the renderer's defaults apply.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    pub color: Rgba,
    /// Constant, linear and quadratic attenuation.
    pub attenuation: Vec3,
    /// Position relative to the camera.
    pub camera_offset: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightingRig {
    pub point: PointLight,
    pub ambient: Rgba,
    pub background: Rgba,
}

const BACKGROUND: Rgba = Rgba(0.15, 0.15, 0.15, 1.0);
const POINT_OFFSET: Vec3 = Vec3 {
    x: -20.0,
    y: 0.0,
    z: 0.0,
};

impl LightingRig {
    pub fn cool() -> Self {
        Self {
            point: PointLight {
                color: Rgba(0.0, 0.75, 1.0, 1.0),
                attenuation: Vec3::new(1.0, 0.001, 0.0),
                camera_offset: POINT_OFFSET,
            },
            ambient: Rgba(0.14, 0.14, 0.24, 1.0),
            background: BACKGROUND,
        }
    }

    pub fn warm() -> Self {
        Self {
            point: PointLight {
                color: Rgba(0.945, 0.556, 0.203, 1.0),
                attenuation: Vec3::new(0.80, 0.001, 0.0),
                camera_offset: POINT_OFFSET,
            },
            ambient: Rgba(0.24, 0.19, 0.16, 1.0),
            background: BACKGROUND,
        }
    }

    pub fn from_preset(preset: LightingPreset) -> Option<Self> {
        match preset {
            LightingPreset::Cool => Some(Self::cool()),
            LightingPreset::Warm => Some(Self::warm()),
            LightingPreset::None => None,
        }
    }
}
