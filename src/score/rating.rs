//! Letter ratings, their score bands, display colours and descriptions.

use serde::{Deserialize, Serialize};

/// Letter rating, A (best) through E (worst).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    A,
    B,
    C,
    D,
    E,
}

/// Lower bound of a rating band. Bands are evaluated in order and the
/// first band whose lower bound the score reaches wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBand {
    pub rating: Rating,
    pub min_score: f64,
}

/// Contiguous bands over [0, 100], highest first.
pub const RATING_BANDS: [RatingBand; 5] = [
    RatingBand {
        rating: Rating::A,
        min_score: 90.0,
    },
    RatingBand {
        rating: Rating::B,
        min_score: 80.0,
    },
    RatingBand {
        rating: Rating::C,
        min_score: 70.0,
    },
    RatingBand {
        rating: Rating::D,
        min_score: 60.0,
    },
    RatingBand {
        rating: Rating::E,
        min_score: 0.0,
    },
];

/// Narrative attached to a rating.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RatingDescription {
    pub title: &'static str,
    pub narrative: &'static str,
    pub recommendation: &'static str,
    pub icon: &'static str,
}

static DESCRIPTIONS: [RatingDescription; 5] = [
    RatingDescription {
        title: "Excellent",
        narrative: "Superior quality - the code meets the highest quality standards",
        recommendation: "Keep the current good practices in place",
        icon: "🏆",
    },
    RatingDescription {
        title: "Good",
        narrative: "High quality - the code is well structured with minor improvements possible",
        recommendation: "Focus on reaching full coverage and reducing occasional failures",
        icon: "✅",
    },
    RatingDescription {
        title: "Acceptable",
        narrative: "Medium quality - the code works but needs improvement",
        recommendation: "Increase test coverage and reduce the failure density",
        icon: "⚠️",
    },
    RatingDescription {
        title: "Poor",
        narrative: "Needs improvement - the code shows significant deficiencies",
        recommendation: "Prioritize refactoring and add more unit tests",
        icon: "❌",
    },
    RatingDescription {
        title: "Critical",
        narrative: "Requires immediate attention - the quality is unacceptable",
        recommendation: "Run a full code review and revisit the testing strategy urgently",
        icon: "🚨",
    },
];

impl Rating {
    pub const ALL: [Rating; 5] = [Rating::A, Rating::B, Rating::C, Rating::D, Rating::E];

    /// Rating for a weighted quality score.
    ///
    /// Scores below 0 or NaN fall through every band and rate E.
    pub fn from_score(score: f64) -> Self {
        RATING_BANDS
            .iter()
            .find(|band| score >= band.min_score)
            .map_or(Rating::E, |band| band.rating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
            Rating::E => "E",
        }
    }

    /// Hex accent colour used by reports.
    pub fn color(&self) -> &'static str {
        match self {
            Rating::A => "#28a745",
            Rating::B => "#5cb85c",
            Rating::C => "#ffc107",
            Rating::D => "#fd7e14",
            Rating::E => "#dc3545",
        }
    }

    pub fn description(&self) -> &'static RatingDescription {
        &DESCRIPTIONS[*self as usize]
    }

    /// Look up a description by rating letter, falling back to E.
    pub fn description_for_code(code: &str) -> &'static RatingDescription {
        code.parse::<Rating>()
            .map_or(&DESCRIPTIONS[Rating::E as usize], |r| r.description())
    }

    /// Whether this rating is at least as good as `other`.
    pub fn meets(&self, other: Rating) -> bool {
        *self <= other
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Rating::A),
            "B" => Ok(Rating::B),
            "C" => Ok(Rating::C),
            "D" => Ok(Rating::D),
            "E" => Ok(Rating::E),
            _ => Err(format!("Unknown rating: {s}. Use one of A, B, C, D, E")),
        }
    }
}
