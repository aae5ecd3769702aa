use serde::{Deserialize, Serialize};

/// Chart types offered by the studio
///
/// Each variant maps onto one series type of the target charting library.
/// The serialized form is the kebab-case id (e.g. `"horizontal-bar"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    /// Line chart - trends over an ordered category axis
    Line,
    /// Vertical bars per category
    Bar,
    /// Bars laid out along the vertical axis
    HorizontalBar,
    /// Line chart with the area under each line filled
    Area,
    /// Points positioned by two numeric columns
    Scatter,
    /// Share of a whole, one slice per row
    Pie,
    /// Pie with a hollow centre
    Doughnut,
    /// Several value columns compared on radial axes
    Radar,
    /// Stages sorted from largest to smallest
    Funnel,
    /// A single value on a dial
    Gauge,
}

/// Which coordinate system a chart type draws on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coordinate {
    Cartesian,
    Polar,
    None,
}

/// Catalog entry describing a chart type to the UI
#[derive(Clone, Debug, Serialize)]
pub struct ChartTypeInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub coordinate: Coordinate,
    /// Minimum number of bound value columns
    pub min_value_columns: usize,
    /// Maximum number of bound value columns, `None` when unbounded
    pub max_value_columns: Option<usize>,
}

const ALL: [ChartType; 10] = [
    ChartType::Line,
    ChartType::Bar,
    ChartType::HorizontalBar,
    ChartType::Area,
    ChartType::Scatter,
    ChartType::Pie,
    ChartType::Doughnut,
    ChartType::Radar,
    ChartType::Funnel,
    ChartType::Gauge,
];

impl ChartType {
    /// Every chart type, in catalog order
    pub fn all() -> &'static [ChartType] {
        &ALL
    }

    pub fn id(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::HorizontalBar => "horizontal-bar",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Radar => "radar",
            ChartType::Funnel => "funnel",
            ChartType::Gauge => "gauge",
        }
    }

    /// Looks up a chart type by id, ignoring case
    pub fn from_id(id: &str) -> Option<Self> {
        let wanted = id.trim().to_lowercase();
        ALL.iter().copied().find(|t| t.id() == wanted)
    }

    pub fn coordinate(&self) -> Coordinate {
        self.info().coordinate
    }

    /// True for chart types drawn against an x/y axis pair
    pub fn is_cartesian(&self) -> bool {
        self.coordinate() == Coordinate::Cartesian
    }

    pub fn info(&self) -> ChartTypeInfo {
        let (label, description, coordinate, min, max) = match self {
            ChartType::Line => (
                "Line",
                "Trends across an ordered category axis",
                Coordinate::Cartesian,
                1,
                None,
            ),
            ChartType::Bar => (
                "Bar",
                "Compare values across categories",
                Coordinate::Cartesian,
                1,
                None,
            ),
            ChartType::HorizontalBar => (
                "Horizontal bar",
                "Bar chart with categories on the vertical axis",
                Coordinate::Cartesian,
                1,
                None,
            ),
            ChartType::Area => (
                "Area",
                "Line chart with filled areas, optionally stacked",
                Coordinate::Cartesian,
                1,
                None,
            ),
            ChartType::Scatter => (
                "Scatter",
                "Relationship between a numeric x column and y columns",
                Coordinate::Cartesian,
                1,
                None,
            ),
            ChartType::Pie => (
                "Pie",
                "Share of a whole for a single value column",
                Coordinate::None,
                1,
                Some(1),
            ),
            ChartType::Doughnut => (
                "Doughnut",
                "Pie chart with a hollow centre",
                Coordinate::None,
                1,
                Some(1),
            ),
            ChartType::Radar => (
                "Radar",
                "Multivariate comparison on radial axes",
                Coordinate::Polar,
                3,
                None,
            ),
            ChartType::Funnel => (
                "Funnel",
                "Stages of a process sorted by size",
                Coordinate::None,
                1,
                Some(1),
            ),
            ChartType::Gauge => (
                "Gauge",
                "Single headline value on a dial",
                Coordinate::None,
                1,
                Some(1),
            ),
        };

        ChartTypeInfo {
            id: self.id(),
            label,
            description,
            coordinate,
            min_value_columns: min,
            max_value_columns: max,
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// The whole catalog as shown in the chart-type picker
pub fn catalog() -> Vec<ChartTypeInfo> {
    ChartType::all().iter().map(|t| t.info()).collect()
}
