use std::fmt::{Display, Formatter};

/// Historical lookback window understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
    Max,
}

impl Period {
    pub const ALL: [Self; 8] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
        Self::Max,
    ];

    /// Periods offered in the window's dropdown.
    pub const SELECTABLE: [Self; 7] = [
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
        Self::Max,
    ];

    /// Fallback when the table action sees an unknown label.
    pub const TABLE_DEFAULT: Self = Self::OneMonth;
    /// Fallback when the change-summary action sees an unknown label.
    pub const SUMMARY_DEFAULT: Self = Self::OneDay;

    pub const fn code(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
            Self::Max => "max",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1 Day",
            Self::FiveDays => "5 Days",
            Self::OneMonth => "1 Month",
            Self::ThreeMonths => "3 Months",
            Self::SixMonths => "6 Months",
            Self::OneYear => "1 Year",
            Self::FiveYears => "5 Years",
            Self::Max => "Max",
        }
    }

    /// Exact match against the human labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|period| period.label() == label)
    }

    /// Resolve a label, falling back to `default` rather than failing.
    pub fn from_label_or(label: &str, default: Self) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            tracing::debug!(label, fallback = default.code(), "unrecognized period label");
            default
        })
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_provider_codes() {
        let codes: Vec<_> = Period::ALL
            .iter()
            .map(|period| (period.label(), period.code()))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("1 Day", "1d"),
                ("5 Days", "5d"),
                ("1 Month", "1mo"),
                ("3 Months", "3mo"),
                ("6 Months", "6mo"),
                ("1 Year", "1y"),
                ("5 Years", "5y"),
                ("Max", "max"),
            ]
        );
    }

    #[test]
    fn unknown_label_falls_back_to_default() {
        assert_eq!(
            Period::from_label_or("2 Weeks", Period::TABLE_DEFAULT).code(),
            "1mo"
        );
        assert_eq!(
            Period::from_label_or("", Period::SUMMARY_DEFAULT).code(),
            "1d"
        );
        assert_eq!(
            Period::from_label_or("6 Months", Period::SUMMARY_DEFAULT),
            Period::SixMonths
        );
    }

    #[test]
    fn dropdown_omits_single_day() {
        assert!(!Period::SELECTABLE.contains(&Period::OneDay));
        assert_eq!(Period::SELECTABLE.len(), 7);
    }
}
