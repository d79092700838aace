use serde::{Deserialize, Serialize};

/// A percentage score. Construction clamps into 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(100);

    pub fn new(value: i64) -> Self {
        Score(value.clamp(0, 100) as u8)
    }

    /// Rounded arithmetic mean; `None` for an empty input.
    pub fn mean<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = Score>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0u32, 0u32), |(sum, count), s| (sum + s.0 as u32, count + 1));
        if count == 0 {
            return None;
        }
        Some(Score::new((sum as f64 / count as f64).round() as i64))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> ScoreBand {
        ScoreBand::from_score(self)
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// Colour band used when rendering a score ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            s if s >= 80 => ScoreBand::Excellent,
            s if s >= 60 => ScoreBand::Good,
            s if s >= 40 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}
