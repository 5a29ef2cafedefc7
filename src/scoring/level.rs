use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity band of a stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl StressLevel {
    pub const ALL: [StressLevel; 4] = [
        StressLevel::Low,
        StressLevel::Moderate,
        StressLevel::High,
        StressLevel::Critical,
    ];

    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            StressLevel::Low
        } else if score < 60 {
            StressLevel::Moderate
        } else if score < 80 {
            StressLevel::High
        } else {
            StressLevel::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Moderate => "Moderate",
            StressLevel::High => "High",
            StressLevel::Critical => "Critical",
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            StressLevel::Low => "#22c55e",
            StressLevel::Moderate => "#eab308",
            StressLevel::High => "#f97316",
            StressLevel::Critical => "#ef4444",
        }
    }

    /// Display color as RGB components.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            StressLevel::Low => (0x22, 0xc5, 0x5e),
            StressLevel::Moderate => (0xea, 0xb3, 0x08),
            StressLevel::High => (0xf9, 0x73, 0x16),
            StressLevel::Critical => (0xef, 0x44, 0x44),
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a score to its severity band.
pub fn score_to_level(score: u8) -> StressLevel {
    StressLevel::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(score_to_level(0), StressLevel::Low);
        assert_eq!(score_to_level(29), StressLevel::Low);
        assert_eq!(score_to_level(30), StressLevel::Moderate);
        assert_eq!(score_to_level(59), StressLevel::Moderate);
        assert_eq!(score_to_level(60), StressLevel::High);
        assert_eq!(score_to_level(79), StressLevel::High);
        assert_eq!(score_to_level(80), StressLevel::Critical);
        assert_eq!(score_to_level(100), StressLevel::Critical);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(StressLevel::Low < StressLevel::Moderate);
        assert!(StressLevel::High < StressLevel::Critical);
    }

    #[test]
    fn test_rgb_matches_hex() {
        for level in StressLevel::ALL {
            let (r, g, b) = level.rgb();
            assert_eq!(level.color(), format!("#{:02x}{:02x}{:02x}", r, g, b));
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(StressLevel::Critical.to_string(), "Critical");
    }
}
