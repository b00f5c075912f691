//! Feature rows and the ordered set of derived columns.

use marketmint_aggregate::Bar;
use marketmint_types::Frequency;
use serde::{Deserialize, Serialize};

/// A bar extended with derived features.
///
/// Rolling values are `None` during warm-up. Crossover flags are always 0
/// or 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// The underlying bar.
    pub bar: Bar,
    /// Close-to-close fractional change.
    pub pct_change: Option<f64>,
    /// Same as `pct_change`, only populated for weekly tables.
    pub weekly_return: Option<f64>,
    /// 4-period simple moving average of close.
    pub sma_4: Option<f64>,
    /// 12-period simple moving average of close.
    pub sma_12: Option<f64>,
    /// 14-period RSI of close.
    pub rsi_14: Option<f64>,
    /// 1 when SMA_4 crossed above SMA_12 on this row.
    pub sma_cross_up: u8,
    /// 1 when SMA_4 crossed below SMA_12 on this row.
    pub sma_cross_down: u8,
}

impl From<Bar> for FeatureRow {
    fn from(bar: Bar) -> Self {
        Self {
            bar,
            pct_change: None,
            weekly_return: None,
            sma_4: None,
            sma_12: None,
            rsi_14: None,
            sma_cross_up: 0,
            sma_cross_down: 0,
        }
    }
}

/// A derived column, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    /// `pct_change`
    PctChange,
    /// `weekly_return`
    WeeklyReturn,
    /// `SMA_4`
    Sma4,
    /// `SMA_12`
    Sma12,
    /// `RSI_14`
    Rsi14,
    /// `sma_cross_up`
    SmaCrossUp,
    /// `sma_cross_down`
    SmaCrossDown,
}

impl FeatureColumn {
    /// Returns every column in output order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PctChange,
            Self::WeeklyReturn,
            Self::Sma4,
            Self::Sma12,
            Self::Rsi14,
            Self::SmaCrossUp,
            Self::SmaCrossDown,
        ]
    }

    /// Returns the columns present for a table of the given frequency.
    #[must_use]
    pub fn for_frequency(frequency: Frequency) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|c| frequency.is_weekly() || *c != Self::WeeklyReturn)
            .collect()
    }

    /// Returns the column header.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PctChange => "pct_change",
            Self::WeeklyReturn => "weekly_return",
            Self::Sma4 => "SMA_4",
            Self::Sma12 => "SMA_12",
            Self::Rsi14 => "RSI_14",
            Self::SmaCrossUp => "sma_cross_up",
            Self::SmaCrossDown => "sma_cross_down",
        }
    }

    /// Parses a column header.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.name() == name)
    }

    /// Returns true for the 0/1 flag columns.
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::SmaCrossUp | Self::SmaCrossDown)
    }

    /// Reads this column's value from a row.
    #[must_use]
    pub fn value(&self, row: &FeatureRow) -> Option<f64> {
        match self {
            Self::PctChange => row.pct_change,
            Self::WeeklyReturn => row.weekly_return,
            Self::Sma4 => row.sma_4,
            Self::Sma12 => row.sma_12,
            Self::Rsi14 => row.rsi_14,
            Self::SmaCrossUp => Some(f64::from(row.sma_cross_up)),
            Self::SmaCrossDown => Some(f64::from(row.sma_cross_down)),
        }
    }

    /// Writes this column's value into a row.
    ///
    /// Flags are stored as 1 for any non-zero value and 0 otherwise.
    pub fn set(&self, row: &mut FeatureRow, value: Option<f64>) {
        let flag = || u8::from(value.is_some_and(|v| v != 0.0));
        match self {
            Self::PctChange => row.pct_change = value,
            Self::WeeklyReturn => row.weekly_return = value,
            Self::Sma4 => row.sma_4 = value,
            Self::Sma12 => row.sma_12 = value,
            Self::Rsi14 => row.rsi_14 = value,
            Self::SmaCrossUp => row.sma_cross_up = flag(),
            Self::SmaCrossDown => row.sma_cross_down = flag(),
        }
    }
}

impl std::fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered table of feature rows and the derived columns it carries.
///
/// A table built from bars alone has no derived columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    /// Rows in bar order.
    pub rows: Vec<FeatureRow>,
    /// Derived columns present, in output order.
    pub columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    /// Wraps bars without derived columns.
    #[must_use]
    pub fn from_bars(bars: &[Bar]) -> Self {
        Self {
            rows: bars.iter().copied().map(FeatureRow::from).collect(),
            columns: Vec::new(),
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the full header: bar columns then derived columns.
    #[must_use]
    pub fn header(&self) -> Vec<&'static str> {
        BAR_COLUMNS
            .iter()
            .copied()
            .chain(self.columns.iter().map(FeatureColumn::name))
            .collect()
    }
}

/// Bar column headers, in output order.
pub const BAR_COLUMNS: &[&str] = &["date", "open", "high", "low", "close", "volume"];
