// src/models/result.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pending,
    Published,
}

/// One graded attempt. Created exactly once per submission; immutable except
/// for the pending -> published transition performed by an admin.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,

    /// Denormalized at creation time so history survives quiz renames.
    pub quiz_title: String,

    /// Count of correctly answered questions.
    pub score: usize,

    pub total_questions: usize,

    /// round(100 * score / total_questions); always derivable from the two
    /// fields above.
    pub percentage: u32,

    pub completed_at: chrono::DateTime<chrono::Utc>,

    pub status: ResultStatus,

    pub student_id: String,
    pub student_name: String,
}

/// Integer percentage with the conventional round-half-up behavior.
/// Guards the zero-question case even though authoring validation makes it
/// unreachable in practice.
pub fn percentage(score: usize, total_questions: usize) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    (100.0 * score as f64 / total_questions as f64).round() as u32
}

/// One rank on the leaderboard: every published result sharing the same
/// exact percentage.
#[derive(Debug, Serialize)]
pub struct LeaderboardGroup {
    /// 1 = highest percentage group.
    pub rank: usize,
    pub percentage: u32,
    pub entries: Vec<QuizResult>,
}

/// Groups results by exact percentage and ranks the distinct percentages
/// descending. Ties share a rank; within a group entries keep insertion
/// order. Pure read-side projection; input is expected to be pre-filtered to
/// published results of a single quiz.
pub fn group_by_percentage(results: Vec<QuizResult>) -> Vec<LeaderboardGroup> {
    let mut grouped: BTreeMap<u32, Vec<QuizResult>> = BTreeMap::new();
    for result in results {
        grouped.entry(result.percentage).or_default().push(result);
    }

    grouped
        .into_iter()
        .rev()
        .enumerate()
        .map(|(i, (percentage, entries))| LeaderboardGroup {
            rank: i + 1,
            percentage,
            entries,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(student: &str, pct: u32) -> QuizResult {
        QuizResult {
            id: format!("r_{student}"),
            quiz_id: "quiz1".to_string(),
            quiz_title: "Mid-Term Pharmacology".to_string(),
            score: pct as usize,
            total_questions: 100,
            percentage: pct,
            completed_at: chrono::Utc::now(),
            status: ResultStatus::Published,
            student_id: student.to_string(),
            student_name: student.to_string(),
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn percentage_guards_zero_questions() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn ties_share_a_rank_and_scores_sort_descending() {
        let groups = group_by_percentage(vec![
            result("aarav", 90),
            result("bina", 90),
            result("chandra", 75),
            result("dipesh", 60),
        ]);

        let scores: Vec<u32> = groups.iter().map(|g| g.percentage).collect();
        assert_eq!(scores, vec![90, 75, 60]);

        assert_eq!(groups[0].rank, 1);
        assert_eq!(groups[0].entries.len(), 2);
        let top: Vec<&str> = groups[0].entries.iter().map(|r| r.student_name.as_str()).collect();
        assert_eq!(top, vec!["aarav", "bina"]);

        assert_eq!(groups[1].rank, 2);
        assert_eq!(groups[2].rank, 3);
    }

    #[test]
    fn empty_input_yields_empty_board() {
        assert!(group_by_percentage(Vec::new()).is_empty());
    }
}
