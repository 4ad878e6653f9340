use serde::{Deserialize, Serialize};

/// One benchmark observation: the problem size and the measured metric
/// (a speedup ratio or an elapsed time in seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub size: f64,
    pub metric: f64,
}

impl Point {
    pub fn new(size: f64, metric: f64) -> Self {
        Self { size, metric }
    }
}

impl From<(f64, f64)> for Point {
    fn from((size, metric): (f64, f64)) -> Self {
        Self { size, metric }
    }
}

/// Ordered (size, metric) pairs from one result column.
///
/// Points are kept sorted ascending by size. The sort is stable, so entries
/// that share a size keep the order they were given in. Deserializing goes
/// through [`Series::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSeries")]
pub struct Series {
    pub name: String,
    points: Vec<Point>,
}

#[derive(Deserialize)]
struct RawSeries {
    name: String,
    points: Vec<Point>,
}

impl From<RawSeries> for Series {
    fn from(raw: RawSeries) -> Self {
        Self::new(raw.name, raw.points)
    }
}

impl Series {
    pub fn new<S: Into<String>>(name: S, mut points: Vec<Point>) -> Self {
        points.sort_by(|a, b| a.size.total_cmp(&b.size));
        Self {
            name: name.into(),
            points,
        }
    }

    /// Build from `(size, metric)` tuples.
    pub fn from_pairs<S: Into<String>>(name: S, pairs: &[(f64, f64)]) -> Self {
        Self::new(name, pairs.iter().copied().map(Point::from).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest metric in the series, `None` when empty.
    pub fn max_metric(&self) -> Option<f64> {
        self.points.iter().map(|p| p.metric).reduce(f64::max)
    }

    /// Smallest and largest size, `None` when empty.
    pub fn size_range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.size, self.points.last()?.size))
    }
}

/// Vertical placement tier of a landmark label.
///
/// Labels of the third cache level sit lower so they do not collide with the
/// second-level label when the two boundaries are close on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelTier {
    #[default]
    Primary,
    Tertiary,
}

impl LabelTier {
    /// Fraction of the chart maximum at which the label baseline is placed.
    pub fn y_fraction(self) -> f64 {
        match self {
            LabelTier::Primary => 0.95,
            LabelTier::Tertiary => 0.85,
        }
    }
}

/// A size of interest (typically a cache-capacity boundary) with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub size: f64,
    pub label: String,
    #[serde(default)]
    pub tier: LabelTier,
}

impl Landmark {
    pub fn new<S: Into<String>>(size: f64, label: S, tier: LabelTier) -> Self {
        Self {
            size,
            label: label.into(),
            tier,
        }
    }
}

/// A size interval highlighted as a band. `height_fraction` is relative to
/// the chart maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub height_fraction: f64,
}

impl Region {
    pub fn new<S: Into<String>>(min: f64, max: f64, label: S, height_fraction: f64) -> Self {
        Self {
            min,
            max,
            label: label.into(),
            height_fraction,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, size: f64) -> bool {
        size >= self.min && size <= self.max
    }
}

/// Where a landmark lands on a concrete series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkAnnotation {
    pub label: String,
    /// The landmark size that was asked for.
    pub target_size: f64,
    /// The data point nearest to `target_size`.
    pub point: Point,
    /// X position of the vertical boundary line (the matched size).
    pub line_x: f64,
    /// Label anchor; the label is right-aligned and bottom-anchored here.
    pub label_x: f64,
    pub label_y: f64,
}

/// A highlighted band produced from a [`Region`] that matched data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBand {
    pub label: String,
    pub x_min: f64,
    pub x_max: f64,
    /// Band rises from the axis floor to this value.
    pub height: f64,
    /// Label center.
    pub label_x: f64,
    pub label_y: f64,
    /// Points of the series inside `[x_min, x_max]`; never empty.
    pub points: Vec<Point>,
}
