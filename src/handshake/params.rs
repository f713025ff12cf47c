use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::YfError;

/// Bar size of a historical download.
///
/// Only `Day`, `Week` and `Month` have a distinct download interval; every
/// other unit is served as daily bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Resolution {
    /// The `interval` query value for the download endpoint.
    pub const fn interval(self) -> &'static str {
        match self {
            Resolution::Week => "1wk",
            Resolution::Month => "1mo",
            _ => "1d",
        }
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Resolution::Hour => "hour",
            Resolution::Day => "day",
            Resolution::Week => "week",
            Resolution::Month => "month",
            Resolution::Quarter => "quarter",
            Resolution::Year => "year",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = YfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "1h" => Ok(Resolution::Hour),
            "day" | "1d" => Ok(Resolution::Day),
            "week" | "1wk" => Ok(Resolution::Week),
            "month" | "1mo" => Ok(Resolution::Month),
            "quarter" | "3mo" => Ok(Resolution::Quarter),
            "year" | "1y" => Ok(Resolution::Year),
            other => Err(YfError::Data(format!("unknown resolution: {other}"))),
        }
    }
}
