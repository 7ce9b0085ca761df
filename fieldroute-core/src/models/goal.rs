#[cfg(test)]
#[path = "../../tests/unit/models/goal_test.rs"]
mod goal_test;

use crate::models::config::{ConfigError, ConstraintConfig};
use crate::models::solution::RouteGraph;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::Add;
use std::sync::Arc;

/// Amount of hard levels in the score.
pub const HARD_LEVELS: usize = 3;

/// A score level, ordered by priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreLevel {
    /// Rest breaks and depot returns are on their own teams and in the right chain position.
    Structural,
    /// Per stop violations: lateness, capacity and attribute mismatches.
    Hard,
    /// Real visits left unassigned.
    Unassigned,
    /// Money: revenue minus costs.
    Soft,
}

impl ScoreLevel {
    fn hard_index(&self) -> Option<usize> {
        match self {
            ScoreLevel::Structural => Some(0),
            ScoreLevel::Hard => Some(1),
            ScoreLevel::Unassigned => Some(2),
            ScoreLevel::Soft => None,
        }
    }
}

/// A lexicographically compared score: hard levels first, then soft one. Bigger is better,
/// penalties are negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Score {
    pub hard: [i64; HARD_LEVELS],
    pub soft: i64,
}

impl Score {
    /// Creates a new [`Score`].
    pub fn new(hard: [i64; HARD_LEVELS], soft: i64) -> Self {
        Self { hard, soft }
    }

    /// Returns value of given level.
    pub fn level(&self, level: ScoreLevel) -> i64 {
        level.hard_index().map_or(self.soft, |idx| self.hard[idx])
    }

    /// Returns a score which has only given level set.
    pub fn of_level(level: ScoreLevel, value: i64) -> Self {
        let mut score = Score::default();
        match level.hard_index() {
            Some(idx) => score.hard[idx] = value,
            None => score.soft = value,
        }
        score
    }

    /// Feasible means no hard level is penalized.
    pub fn is_feasible(&self) -> bool {
        self.hard.iter().all(|value| *value >= 0)
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Self) -> Self::Output {
        let mut hard = self.hard;
        hard.iter_mut().zip(rhs.hard.iter()).for_each(|(left, right)| *left = left.saturating_add(*right));

        Score { hard, soft: self.soft.saturating_add(rhs.soft) }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard.cmp(&other.hard).then_with(|| self.soft.cmp(&other.soft))
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hard = self.hard.iter().map(|value| value.to_string()).collect::<Vec<_>>().join("/");
        write!(f, "[{hard}]hard/[{}]soft", self.soft)
    }
}

/// Data available to scoring rules.
pub struct ScoringContext<'a> {
    pub graph: &'a RouteGraph,
    pub config: &'a ConstraintConfig,
}

/// Computes an impact of a single rule on its score level. Penalties are negative.
pub trait FeatureObjective: Send + Sync {
    fn evaluate(&self, ctx: &ScoringContext) -> i64;
}

/// A named scoring rule bound to a score level.
#[derive(Clone)]
pub struct Feature {
    pub name: String,
    pub level: ScoreLevel,
    pub objective: Arc<dyn FeatureObjective>,
}

/// Impact of one feature on the score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub level: ScoreLevel,
    pub impact: i64,
}

/// A score with per feature breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreExplanation {
    pub score: Score,
    pub entries: Vec<ScoreEntry>,
}

impl Display for ScoreExplanation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "score: {}", self.score)?;
        self.entries.iter().filter(|entry| entry.impact != 0).try_for_each(|entry| {
            writeln!(f, "  {:?} '{}': {}", entry.level, entry.name, entry.impact)
        })
    }
}

/// Combines features into a score of a route graph.
#[derive(Clone)]
pub struct GoalContext {
    features: Vec<Feature>,
    config: Arc<ConstraintConfig>,
}

impl GoalContext {
    /// Creates a new instance of [`GoalContext`]. Feature names must be unique.
    pub fn new(features: Vec<Feature>, config: Arc<ConstraintConfig>) -> Result<Self, ConfigError> {
        let mut names = FxHashSet::default();
        if let Some(feature) = features.iter().find(|feature| !names.insert(feature.name.as_str())) {
            return Err(ConfigError::DuplicateFeature(feature.name.clone()));
        }

        Ok(Self { features, config })
    }

    pub fn config(&self) -> &ConstraintConfig {
        self.config.as_ref()
    }

    pub fn features(&self) -> &[Feature] {
        self.features.as_slice()
    }

    /// Evaluates score of a fully propagated graph.
    pub fn evaluate(&self, graph: &RouteGraph) -> Score {
        let ctx = ScoringContext { graph, config: self.config.as_ref() };

        self.features.iter().fold(Score::default(), |score, feature| {
            score + Score::of_level(feature.level, feature.objective.evaluate(&ctx))
        })
    }

    /// Evaluates score together with impact of every feature.
    pub fn explain(&self, graph: &RouteGraph) -> ScoreExplanation {
        let ctx = ScoringContext { graph, config: self.config.as_ref() };

        let entries = self
            .features
            .iter()
            .map(|feature| ScoreEntry {
                name: feature.name.clone(),
                level: feature.level,
                impact: feature.objective.evaluate(&ctx),
            })
            .collect::<Vec<_>>();

        let score =
            entries.iter().fold(Score::default(), |score, entry| score + Score::of_level(entry.level, entry.impact));

        ScoreExplanation { score, entries }
    }
}
