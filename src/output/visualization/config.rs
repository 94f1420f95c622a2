//! Plot configuration shared across visualization modules
//!
//! This module defines the common configuration structure used by both the
//! time-series and phase-portrait plotting functions.

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// Used by both time-series (population vs time) and phase-portrait
/// (predator vs prey) plots.
///
/// # Example
///
/// ```rust,ignore
/// use lotka_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::phase_portrait("Orbit from (1000, 560)");
/// config.width = 1920;  // Full HD
/// config.height = 1080;
/// config.field_color = RGBColor(120, 120, 120);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: auto-set by plot type)
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Prey series color in time-series plots (default: BLUE)
    pub prey_color: RGBColor,

    /// Predator series color in time-series plots (default: RED)
    pub predator_color: RGBColor,

    /// Orbit line color for single-orbit phase portraits (default: BLUE)
    pub orbit_color: RGBColor,

    /// Optional per-orbit colors for family plots
    ///
    /// If None, uses the default palette; if Some, orbits beyond the list
    /// wrap around.
    pub orbit_colors: Option<Vec<RGBColor>>,

    /// Start-marker color in phase portraits (default: RED)
    pub marker_color: RGBColor,

    /// Direction-field arrow color (default: dark gray)
    pub field_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(), // Set by specific plot type
            ylabel: String::new(),
            prey_color: BLUE,
            predator_color: RED,
            orbit_color: BLUE,
            orbit_colors: None,
            marker_color: RED,
            field_color: RGBColor(96, 96, 96),
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::time_series(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for time-series plots with optional custom title
    ///
    /// Sets the axis labels to "Time" / "Population (tens of thousands)" and
    /// the title to the custom value or "Predator and Prey Population vs Time".
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::time_series("Orbit 1000/560");
    /// let config = PlotConfig::time_series(None::<&str>);
    /// ```
    pub fn time_series(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "Time".to_string();
        config.ylabel = "Population (tens of thousands)".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Predator and Prey Population vs Time".to_string());
        config
    }

    /// Create config for phase portraits with optional custom title
    ///
    /// Sets the axis labels to "Prey Population" / "Predator Population" and
    /// the title to the custom value or "Predator vs Prey Population".
    pub fn phase_portrait(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "Prey Population".to_string();
        config.ylabel = "Predator Population".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Predator vs Prey Population".to_string());
        config
    }

    /// Create config for family plots with custom orbit colors
    pub fn orbit_family_colors(colors: Vec<RGBColor>) -> Self {
        let mut config = Self::phase_portrait(NO_TITLE);
        config.orbit_colors = Some(colors);
        config
    }

    /// Get color for orbit at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to the default
    /// palette.
    pub(crate) fn get_orbit_color(&self, orbit_index: usize) -> RGBColor {
        if let Some(ref colors) = self.orbit_colors {
            if orbit_index < colors.len() {
                return colors[orbit_index];
            }
        }

        // Default palette
        let default_colors = [
            BLUE,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),   // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        default_colors[orbit_index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.show_grid);
    }

    #[test]
    fn test_time_series_config_default() {
        let config = PlotConfig::time_series(NO_TITLE);
        assert_eq!(config.xlabel, "Time");
        assert_eq!(config.title, "Predator and Prey Population vs Time");
    }

    #[test]
    fn test_time_series_config_with_str() {
        let config = PlotConfig::time_series("Orbit 1000/560");
        assert_eq!(config.title, "Orbit 1000/560");
    }

    #[test]
    fn test_phase_portrait_config_with_string() {
        let title = format!("Orbit from ({}, {})", 1000, 560);
        let config = PlotConfig::phase_portrait(title);
        assert_eq!(config.xlabel, "Prey Population");
        assert_eq!(config.title, "Orbit from (1000, 560)");
    }

    #[test]
    fn test_get_orbit_color_default_palette() {
        let config = PlotConfig::default();
        assert_eq!(config.get_orbit_color(0), BLUE);
        assert_eq!(config.get_orbit_color(1), RED);
        assert_eq!(config.get_orbit_color(10), BLUE); // Wraparound
    }

    #[test]
    fn test_get_orbit_color_custom() {
        use plotters::style::full_palette::{LIGHTBLUE, LIGHTGREEN, ORANGE};
        let config = PlotConfig::orbit_family_colors(vec![ORANGE, LIGHTGREEN, LIGHTBLUE]);
        assert_eq!(config.get_orbit_color(0), ORANGE);
        assert_eq!(config.get_orbit_color(1), LIGHTGREEN);
        assert_eq!(config.get_orbit_color(2), LIGHTBLUE);
    }
}
