use crate::catalog::ChartType;
use crate::dataset::Dataset;
use crate::error::{Result, StudioError};
use crate::theme::Theme;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap();
}

pub const MAX_ANIMATION_MS: u32 = 10_000;
pub const MAX_GRID_MARGIN: u8 = 50;
pub const MIN_SYMBOL_SIZE: u8 = 1;
pub const MAX_SYMBOL_SIZE: u8 = 64;

/// Everything the studio knows about one chart
///
/// This is the record the editing forms bind to, the unit the store saves,
/// and the input of the options builder. Missing fields in JSON fall back
/// to their defaults so partially filled forms can be submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub grid: GridOptions,
    pub colors: ColorOptions,
    pub tooltip: TooltipOptions,
    pub animation: AnimationOptions,
    pub axes: AxisOptions,
    pub series: SeriesOptions,
    pub theme: Theme,
    pub data: DataBinding,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleOptions {
    pub show: bool,
    pub text: String,
    pub subtext: String,
    pub align: Align,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            show: true,
            text: "Untitled chart".to_string(),
            subtext: String::new(),
            align: Align::Center,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub show: bool,
    pub position: LegendPosition,
    pub orient: Orientation,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            show: true,
            position: LegendPosition::Bottom,
            orient: Orientation::Horizontal,
        }
    }
}

/// Grid lines and plot-area margins (margins are percentages of the canvas)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub show_x_lines: bool,
    pub show_y_lines: bool,
    pub left: u8,
    pub right: u8,
    pub top: u8,
    pub bottom: u8,
    pub contain_label: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            show_x_lines: false,
            show_y_lines: true,
            left: 10,
            right: 10,
            top: 15,
            bottom: 15,
            contain_label: true,
        }
    }
}

/// Series colours and canvas background; empty values defer to the theme
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub palette: Vec<String>,
    pub background: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    #[default]
    Axis,
    Item,
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub show: bool,
    pub trigger: TooltipTrigger,
    /// Template string passed through to the charting library, e.g. `"{b}: {c}"`
    pub formatter: Option<String>,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            show: true,
            trigger: TooltipTrigger::Axis,
            formatter: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    QuadraticIn,
    QuadraticOut,
    #[default]
    CubicOut,
    CubicIn,
    ElasticOut,
    BounceOut,
}

impl Easing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadraticIn => "quadraticIn",
            Easing::QuadraticOut => "quadraticOut",
            Easing::CubicOut => "cubicOut",
            Easing::CubicIn => "cubicIn",
            Easing::ElasticOut => "elasticOut",
            Easing::BounceOut => "bounceOut",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub enabled: bool,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 1000,
            easing: Easing::CubicOut,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub x_name: String,
    pub y_name: String,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub smooth: bool,
    pub stacked: bool,
    pub show_labels: bool,
    pub symbol_size: u8,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            smooth: false,
            stacked: false,
            show_labels: false,
            symbol_size: 6,
        }
    }
}

/// Which dataset columns feed the chart
///
/// `category_column` supplies the x-axis labels (or slice names, or the
/// numeric x for scatter charts). Each entry of `value_columns` becomes a
/// series, except for radar charts where they become the radial axes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataBinding {
    pub dataset: Dataset,
    pub category_column: Option<String>,
    pub value_columns: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(ChartType::Line)
    }
}

impl ChartConfig {
    pub fn new(chart_type: ChartType) -> Self {
        let tooltip = TooltipOptions {
            trigger: if chart_type.is_cartesian() {
                TooltipTrigger::Axis
            } else {
                TooltipTrigger::Item
            },
            ..TooltipOptions::default()
        };

        ChartConfig {
            chart_type,
            title: TitleOptions::default(),
            legend: LegendOptions::default(),
            grid: GridOptions::default(),
            colors: ColorOptions::default(),
            tooltip,
            animation: AnimationOptions::default(),
            axes: AxisOptions::default(),
            series: SeriesOptions::default(),
            theme: Theme::default(),
            data: DataBinding::default(),
        }
    }

    /// Binds a dataset to the chart
    pub fn with_data(
        mut self,
        dataset: Dataset,
        category_column: Option<&str>,
        value_columns: &[&str],
    ) -> Self {
        self.data = DataBinding {
            dataset,
            category_column: category_column.map(str::to_string),
            value_columns: value_columns.iter().map(|c| c.to_string()).collect(),
        };
        self
    }

    pub fn with_title(mut self, text: &str) -> Self {
        self.title.text = text.to_string();
        self
    }

    /// Checks the whole configuration and reports every problem at once
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            log::warn!(
                "rejected {} chart configuration: {} problem(s)",
                self.chart_type,
                problems.len()
            );
            Err(StudioError::Validation(problems))
        }
    }

    /// Human-readable list of validation failures, empty when valid
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for color in &self.colors.palette {
            if !HEX_COLOR_REGEX.is_match(color) {
                problems.push(format!("Palette colour '{}' is not a hex colour", color));
            }
        }
        if let Some(bg) = &self.colors.background {
            if !HEX_COLOR_REGEX.is_match(bg) {
                problems.push(format!("Background colour '{}' is not a hex colour", bg));
            }
        }

        if self.animation.duration_ms > MAX_ANIMATION_MS {
            problems.push(format!(
                "Animation duration {}ms exceeds {}ms",
                self.animation.duration_ms, MAX_ANIMATION_MS
            ));
        }

        let g = &self.grid;
        for (side, value) in [
            ("left", g.left),
            ("right", g.right),
            ("top", g.top),
            ("bottom", g.bottom),
        ] {
            if value > MAX_GRID_MARGIN {
                problems.push(format!(
                    "Grid margin {} is {}%, maximum is {}%",
                    side, value, MAX_GRID_MARGIN
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.axes.y_min, self.axes.y_max) {
            if min >= max {
                problems.push(format!("Axis minimum {} must be below maximum {}", min, max));
            }
        }

        if !(MIN_SYMBOL_SIZE..=MAX_SYMBOL_SIZE).contains(&self.series.symbol_size) {
            problems.push(format!(
                "Symbol size {} must be between {} and {}",
                self.series.symbol_size, MIN_SYMBOL_SIZE, MAX_SYMBOL_SIZE
            ));
        }

        self.binding_problems(&mut problems);
        problems
    }

    fn binding_problems(&self, problems: &mut Vec<String>) {
        let info = self.chart_type.info();
        let binding = &self.data;
        let count = binding.value_columns.len();

        if count < info.min_value_columns {
            problems.push(format!(
                "{} charts need at least {} value column(s), got {}",
                info.label, info.min_value_columns, count
            ));
        }
        if let Some(max) = info.max_value_columns {
            if count > max {
                problems.push(format!(
                    "{} charts take at most {} value column(s), got {}",
                    info.label, max, count
                ));
            }
        }

        let dataset = &binding.dataset;
        for column in binding.value_columns.iter().chain(binding.category_column.iter()) {
            if dataset.column_index(column).is_none() {
                problems.push(format!("Column '{}' is not in the dataset", column));
            }
        }

        if self.chart_type == ChartType::Scatter && binding.category_column.is_none() {
            problems.push("Scatter charts need a numeric category column for x".to_string());
        }
    }
}
