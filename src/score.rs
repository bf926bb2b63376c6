//! Scoring and grading for codecoach reports.
//!
//! Two independent computations live here. The skill score decides the
//! reported skill level and charges 10 points per finding; the report score
//! is what the learner sees as a grade and charges 5. Both share the
//! complexity penalty table and the structure bonuses.

use serde::{Deserialize, Serialize};

use crate::analysis::{Complexity, Metrics};

/// Point weights.
pub mod points {
    pub const BASE: i32 = 100;
    pub const SKILL_FINDING_PENALTY: i32 = 10;
    pub const REPORT_FINDING_PENALTY: i32 = 5;
    pub const QUADRATIC_PENALTY: i32 = 10;
    pub const CUBIC_PENALTY: i32 = 20;
    pub const EXPONENTIAL_PENALTY: i32 = 30;
    pub const MODULAR_BONUS: i32 = 5; // more than one function
    pub const SHORT_CODE_BONUS: i32 = 5; // fewer than SHORT_CODE_LINES lines
    pub const FLAT_BONUS: i32 = 5; // no nested loops, report score only
    pub const SHORT_CODE_LINES: usize = 50;
}

/// Grade thresholds (minimum score for each letter).
pub mod grades {
    pub const A_PLUS_MIN: i32 = 90;
    pub const A_MIN: i32 = 80;
    pub const B_MIN: i32 = 70;
    pub const C_MIN: i32 = 60;
    pub const D_MIN: i32 = 50;
}

/// Skill score thresholds.
pub mod skill {
    pub const ADVANCED_MIN: i32 = 80;
    pub const INTERMEDIATE_MIN: i32 = 60;
}

/// Estimated programmer skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    /// The complexity class a programmer at this level is expected to write.
    pub fn expected_complexity(&self) -> Complexity {
        match self {
            SkillLevel::Beginner => Complexity::Linear,
            SkillLevel::Intermediate => Complexity::Quadratic,
            SkillLevel::Advanced => Complexity::Cubic,
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(format!("unknown skill level: {}", s)),
        }
    }
}

/// How the report score was assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub mistakes_penalty: i32,
    pub complexity_penalty: i32,
    pub bonus_points: i32,
}

/// The report score shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeScore {
    /// Score from 0-100, higher is better
    pub score: i32,
    /// Letter grade: "A+", "A", "B", "C", "D" or "F"
    pub grade: String,
    pub breakdown: ScoreBreakdown,
}

/// Penalty for a complexity class. Constant and linear are free.
pub fn complexity_penalty(complexity: Complexity) -> i32 {
    match complexity {
        Complexity::Constant | Complexity::Linear => 0,
        Complexity::Quadratic => points::QUADRATIC_PENALTY,
        Complexity::Cubic => points::CUBIC_PENALTY,
        Complexity::Exponential => points::EXPONENTIAL_PENALTY,
    }
}

fn structure_bonus(metrics: &Metrics) -> i32 {
    let mut bonus = 0;
    if metrics.functions > 1 {
        bonus += points::MODULAR_BONUS;
    }
    if metrics.total_lines < points::SHORT_CODE_LINES {
        bonus += points::SHORT_CODE_BONUS;
    }
    bonus
}

fn count_penalty(findings: usize, per_finding: i32) -> i32 {
    i32::try_from(findings)
        .unwrap_or(i32::MAX)
        .saturating_mul(per_finding)
}

/// Unclamped score used to derive the skill level.
pub fn skill_score(metrics: &Metrics, finding_count: usize) -> i32 {
    points::BASE
        .saturating_sub(count_penalty(finding_count, points::SKILL_FINDING_PENALTY))
        - complexity_penalty(metrics.complexity)
        + structure_bonus(metrics)
}

/// Map the skill score to a level: 80+ advanced, 60+ intermediate.
pub fn derive_skill_level(metrics: &Metrics, finding_count: usize) -> SkillLevel {
    match skill_score(metrics, finding_count) {
        s if s >= skill::ADVANCED_MIN => SkillLevel::Advanced,
        s if s >= skill::INTERMEDIATE_MIN => SkillLevel::Intermediate,
        _ => SkillLevel::Beginner,
    }
}

/// Determine the letter grade from a score.
pub fn grade_for(score: i32) -> &'static str {
    match score {
        s if s >= grades::A_PLUS_MIN => "A+",
        s if s >= grades::A_MIN => "A",
        s if s >= grades::B_MIN => "B",
        s if s >= grades::C_MIN => "C",
        s if s >= grades::D_MIN => "D",
        _ => "F",
    }
}

/// Calculate the report score, clamped to 0-100.
pub fn calculate(metrics: &Metrics, finding_count: usize) -> CodeScore {
    let mistakes_penalty = count_penalty(finding_count, points::REPORT_FINDING_PENALTY);
    let complexity_penalty = complexity_penalty(metrics.complexity);

    let mut bonus = structure_bonus(metrics);
    if metrics.nested_loops == 0 {
        bonus += points::FLAT_BONUS;
    }

    let before_bonus = points::BASE.saturating_sub(mistakes_penalty) - complexity_penalty;
    let score = (before_bonus + bonus).clamp(0, 100);

    CodeScore {
        score,
        grade: grade_for(score).to_string(),
        breakdown: ScoreBreakdown {
            base: points::BASE,
            mistakes_penalty,
            complexity_penalty,
            bonus_points: (score - before_bonus).max(0),
        },
    }
}
