pub mod bar_chart;
mod chart;
pub mod common;
mod config;
pub mod line_chart;
mod mixed_chart;

pub use self::chart::{Chart, ChartImpl, DrawChartOptions};
pub use self::config::{ChartColors, ChartConfig, CHART_CONFIG, DARK_CHART_COLORS, LIGHT_CHART_COLORS};
pub use self::mixed_chart::*;
