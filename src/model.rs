use crate::error::{StagehandError, StagehandResult};

/// Declared properties of one authored composition: canvas size, background
/// color as a `"#RRGGBB"` string, target frame rate and the external id.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Properties {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub color: String, // "#RRGGBB"
    pub fps: f64,
}

impl Properties {
    /// Parse the declared background color into a packed `0xRRGGBB` integer.
    pub fn background_color(&self) -> StagehandResult<u32> {
        let hex = self.color.strip_prefix('#').ok_or_else(|| {
            StagehandError::validation(format!(
                "background color '{}' must start with '#'",
                self.color
            ))
        })?;
        if hex.len() != 6 {
            return Err(StagehandError::validation(format!(
                "background color '{}' must be #RRGGBB",
                self.color
            )));
        }
        u32::from_str_radix(hex, 16).map_err(|e| {
            StagehandError::validation(format!(
                "background color '{}' is not valid hex: {e}",
                self.color
            ))
        })
    }

    pub fn validate(&self) -> StagehandResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StagehandError::validation(
                "composition width/height must be > 0",
            ));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(StagehandError::validation("composition fps must be > 0"));
        }
        self.background_color()?;
        Ok(())
    }
}

/// Opaque configuration forwarded to the loader's preparation routines.
/// The adapter applies it verbatim and never inspects individual keys.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PrepareOptions(pub serde_json::Map<String, serde_json::Value>);

/// Opaque configuration forwarded to the loader's async asset load.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LoadOptions(pub serde_json::Map<String, serde_json::Value>);

/// Caller-supplied render application options. Width, height and background
/// color derived from [`Properties`] take precedence over same-named keys;
/// everything else passes through unchanged.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RenderOptions(pub serde_json::Map<String, serde_json::Value>);
