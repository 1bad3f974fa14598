use serde::Deserialize;

use crate::error::TraceError;

/// All pipeline parameters in one struct.
///
/// Deserializable so presets can be loaded from JSON; every field is
/// optional in a preset and falls back to [`PipelineConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // -- Bitmap stage --
    /// Threshold method for converting to binary.
    pub threshold: ThresholdMethod,
    /// If true, swap foreground/background after thresholding.
    pub invert: bool,

    // -- Tracing stage --
    pub trace: TraceParams,

    // -- Geometry stage --
    /// Chord-length bounds, measured in normalized space.
    pub filter: FilterCriteria,
    /// How the pixel-space scale factor is chosen before normalization.
    pub scale: ScaleMode,

    // -- Output --
    /// Number rendering for the emitted equation strings.
    pub number_format: NumberFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdMethod::Fixed(128),
            invert: false,
            trace: TraceParams::default(),
            filter: FilterCriteria::default(),
            scale: ScaleMode::Identity,
            number_format: NumberFormat::Shortest,
        }
    }
}

impl PipelineConfig {
    /// Reject parameter combinations that can never produce output or
    /// would make the tracer misbehave.
    pub fn validate(&self) -> Result<(), TraceError> {
        let FilterCriteria { min_length, max_length } = self.filter;
        if min_length.is_nan() || max_length.is_nan() {
            return Err(TraceError::InvalidConfig("length bounds must be numbers".into()));
        }
        if min_length < 0.0 {
            return Err(TraceError::InvalidConfig(format!(
                "min_length must be >= 0, got {}",
                min_length
            )));
        }
        if min_length > max_length {
            return Err(TraceError::InvalidConfig(format!(
                "min_length {} exceeds max_length {}",
                min_length, max_length
            )));
        }
        if !(0.0..=4.0 / 3.0).contains(&self.trace.alphamax) {
            return Err(TraceError::InvalidConfig(format!(
                "alphamax must be within 0..=1.334, got {}",
                self.trace.alphamax
            )));
        }
        if self.trace.polygon_epsilon.is_nan() || self.trace.polygon_epsilon < 0.0 {
            return Err(TraceError::InvalidConfig(format!(
                "polygon_epsilon must be >= 0, got {}",
                self.trace.polygon_epsilon
            )));
        }
        Ok(())
    }
}

/// Threshold method for converting a grayscale image to binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMethod {
    /// Pixels darker than this brightness (0-255) are foreground.
    Fixed(u8),
    /// Otsu's method (automatic).
    Otsu,
}

/// Parameters of the built-in outline tracer.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    /// Outlines enclosing this many pixels or fewer are dropped as speckles.
    pub turd_size: usize,
    /// Corner threshold on the alpha parameter. Vertices with
    /// alpha >= this become corners. 0 = all corners, 4/3 = no corners.
    pub alphamax: f64,
    /// Ramer-Douglas-Peucker tolerance (pixels) for the outline polygon.
    pub polygon_epsilon: f64,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            turd_size: 2,
            alphamax: 1.0,
            polygon_epsilon: 1.0,
        }
    }
}

/// Inclusive chord-length bounds for admitting a curve.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub min_length: f64,
    pub max_length: f64,
}

impl FilterCriteria {
    pub fn new(min_length: f64, max_length: f64) -> Self {
        Self { min_length, max_length }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_length: 0.0,
            max_length: f64::INFINITY,
        }
    }
}

/// Scale factor applied to pixel coordinates before centering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Scale = 1.
    Identity,
    /// Scale = mean of (max x / width, max y / height) over every traced point.
    AverageExtent,
}

/// How coordinates are written into equation strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// Shortest text that round-trips to the same `f64`.
    Shortest,
    /// Fixed number of decimal places.
    Fixed(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let config = PipelineConfig {
            filter: FilterCriteria::new(10.0, 5.0),
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(TraceError::InvalidConfig(_))));
    }

    #[test]
    fn equal_bounds_are_accepted() {
        let config = PipelineConfig {
            filter: FilterCriteria::new(5.0, 5.0),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nan_epsilon_is_rejected() {
        let mut config = PipelineConfig::default();
        config.trace.polygon_epsilon = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn preset_fills_missing_fields_with_defaults() {
        let json = r#"{
            "threshold": { "fixed": 90 },
            "filter": { "min_length": 3.5 },
            "number_format": { "fixed": 2 }
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.threshold, ThresholdMethod::Fixed(90));
        assert_eq!(config.filter.min_length, 3.5);
        assert_eq!(config.filter.max_length, f64::INFINITY);
        assert_eq!(config.number_format, NumberFormat::Fixed(2));
        assert_eq!(config.scale, ScaleMode::Identity);
        assert_eq!(config.trace.turd_size, 2);
    }

    #[test]
    fn unit_variants_parse_from_strings() {
        let json = r#"{ "threshold": "otsu", "scale": "average_extent" }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.threshold, ThresholdMethod::Otsu);
        assert_eq!(config.scale, ScaleMode::AverageExtent);
    }
}
