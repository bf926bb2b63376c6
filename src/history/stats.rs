//! Aggregate statistics over saved analyses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HistoryEntry;
use crate::detect::FindingKind;

/// How many mistake types are listed in `common_mistakes`.
const TOP_MISTAKES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeCount {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub count: usize,
}

/// Score change between two consecutive analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStep {
    pub from_id: u64,
    pub to_id: u64,
    pub score_change: i32,
    pub improvement: bool,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStatistics {
    pub total_analyses: usize,
    pub average_score: f64,
    pub best_score: i32,
    pub worst_score: i32,
    pub total_mistakes: usize,
    pub average_mistakes: f64,
    pub languages: BTreeMap<String, usize>,
    pub skill_levels: BTreeMap<String, usize>,
    pub common_mistakes: Vec<MistakeCount>,
    pub progress_over_time: Vec<ProgressStep>,
}

pub fn compute(entries: &[HistoryEntry]) -> Option<HistoryStatistics> {
    if entries.is_empty() {
        return None;
    }
    let n = entries.len() as f64;
    let total_score: i64 = entries.iter().map(|e| i64::from(e.score)).sum();
    let total_mistakes: usize = entries.iter().map(|e| e.mistakes_count).sum();

    let mut languages = BTreeMap::new();
    let mut skill_levels = BTreeMap::new();
    let mut frequency: BTreeMap<FindingKind, usize> = BTreeMap::new();
    for entry in entries {
        *languages.entry(entry.language.to_string()).or_insert(0) += 1;
        *skill_levels.entry(entry.skill_level.to_string()).or_insert(0) += 1;
        for kind in &entry.mistake_types {
            *frequency.entry(*kind).or_insert(0) += 1;
        }
    }

    Some(HistoryStatistics {
        total_analyses: entries.len(),
        average_score: total_score as f64 / n,
        best_score: entries.iter().map(|e| e.score).max().unwrap_or(0),
        worst_score: entries.iter().map(|e| e.score).min().unwrap_or(0),
        total_mistakes,
        average_mistakes: total_mistakes as f64 / n,
        languages,
        skill_levels,
        common_mistakes: common_mistakes(frequency),
        progress_over_time: progress(entries),
    })
}

/// Most frequent first, ties by name.
fn common_mistakes(frequency: BTreeMap<FindingKind, usize>) -> Vec<MistakeCount> {
    let mut counts: Vec<MistakeCount> = frequency
        .into_iter()
        .map(|(kind, count)| MistakeCount { kind, count })
        .collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
    });
    counts.truncate(TOP_MISTAKES);
    counts
}

fn progress(entries: &[HistoryEntry]) -> Vec<ProgressStep> {
    let mut sorted: Vec<&HistoryEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
        .windows(2)
        .map(|pair| ProgressStep {
            from_id: pair[0].id,
            to_id: pair[1].id,
            score_change: pair[1].score - pair[0].score,
            improvement: pair[1].score > pair[0].score,
            date: pair[1].timestamp,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Complexity;
    use crate::language::Language;
    use crate::score::SkillLevel;
    use chrono::{Duration, TimeZone};

    fn entry(id: u64, minutes: i64, score: i32, language: Language, kinds: &[FindingKind]) -> HistoryEntry {
        HistoryEntry {
            id,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes),
            language,
            origin: format!("f{}", id),
            skill_level: SkillLevel::Intermediate,
            score,
            grade: "B".to_string(),
            total_lines: 10,
            complexity: Complexity::Linear,
            mistakes_count: kinds.len(),
            summary: String::new(),
            source_preview: String::new(),
            mistake_types: kinds.to_vec(),
        }
    }

    #[test]
    fn test_empty_history_has_no_statistics() {
        assert!(compute(&[]).is_none());
    }

    #[test]
    fn test_aggregates() {
        let entries = vec![
            entry(1, 0, 60, Language::Python, &[FindingKind::MagicNumbers, FindingKind::NestedLoops]),
            entry(2, 5, 80, Language::C, &[FindingKind::MagicNumbers]),
            entry(3, 10, 70, Language::Python, &[]),
        ];
        let stats = compute(&entries).unwrap();
        assert_eq!(stats.total_analyses, 3);
        assert!((stats.average_score - 70.0).abs() < 1e-9);
        assert_eq!(stats.best_score, 80);
        assert_eq!(stats.worst_score, 60);
        assert_eq!(stats.total_mistakes, 3);
        assert!((stats.average_mistakes - 1.0).abs() < 1e-9);
        assert_eq!(stats.languages["python"], 2);
        assert_eq!(stats.languages["c"], 1);
        assert_eq!(stats.skill_levels["intermediate"], 3);
        assert_eq!(
            stats.common_mistakes[0],
            MistakeCount { kind: FindingKind::MagicNumbers, count: 2 }
        );
    }

    #[test]
    fn test_common_mistakes_ties_by_name() {
        let kinds = [
            FindingKind::UnusedVariable,
            FindingKind::DeepIndentation,
            FindingKind::LongFunction,
            FindingKind::TooManyConditions,
            FindingKind::NestedLoops,
            FindingKind::MagicNumbers,
        ];
        let stats = compute(&[entry(1, 0, 50, Language::C, &kinds)]).unwrap();
        let names: Vec<&str> = stats.common_mistakes.iter().map(|m| m.kind.as_str()).collect();
        assert_eq!(
            names,
            vec!["DEEP_INDENTATION", "LONG_FUNCTION", "MAGIC_NUMBERS", "NESTED_LOOPS", "TOO_MANY_CONDITIONS"]
        );
    }

    #[test]
    fn test_progress_sorted_by_time() {
        let entries = vec![
            entry(2, 10, 70, Language::Python, &[]),
            entry(1, 0, 80, Language::Python, &[]),
            entry(3, 20, 90, Language::Python, &[]),
        ];
        let steps = compute(&entries).unwrap().progress_over_time;
        assert_eq!(steps.len(), 2);
        assert_eq!((steps[0].from_id, steps[0].to_id), (1, 2));
        assert_eq!(steps[0].score_change, -10);
        assert!(!steps[0].improvement);
        assert!(steps[1].improvement);

        assert!(compute(&entries[..1]).unwrap().progress_over_time.is_empty());
    }
}
