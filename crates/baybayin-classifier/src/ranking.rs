//! Top-k ranking of classifier scores.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::labels::LabelTable;

/// One ranked class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Classifier output index.
    pub index: usize,
    pub label: String,
    pub score: f32,
}

impl Prediction {
    pub fn confidence_percent(&self) -> f32 {
        self.score * 100.0
    }
}

/// Indices of the `k` largest scores, descending.
///
/// Ties keep the original index order; NaN ranks below every number.
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));
    order.truncate(k);
    order
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Rank scores and attach labels.
///
/// Indices without a label (a score vector longer than the table) are skipped.
pub fn rank(scores: &[f32], labels: &LabelTable, k: usize) -> Vec<Prediction> {
    top_k_indices(scores, scores.len())
        .into_iter()
        .filter_map(|index| labels.get(index).map(|label| (index, label)))
        .take(k)
        .enumerate()
        .map(|(pos, (index, label))| Prediction {
            rank: pos + 1,
            index,
            label: label.to_string(),
            score: scores[index],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::NUM_CLASSES;

    #[test]
    fn top_five_follows_descending_scores() {
        let mut scores = vec![0.0f32; NUM_CLASSES];
        for (i, s) in [(12, 0.4), (3, 0.9), (58, 0.7), (0, 0.05), (34, 0.6), (20, 0.1)] {
            scores[i] = s;
        }
        let top = rank(&scores, &LabelTable::baybayin(), 5);
        let got: Vec<(usize, usize, &str)> = top
            .iter()
            .map(|p| (p.rank, p.index, p.label.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, 3, "be_bi"),
                (2, 58, "yo_yu"),
                (3, 34, "nga"),
                (4, 12, "ge_gi"),
                (5, 20, "ke_ki"),
            ]
        );
        assert_eq!(top[0].score, 0.9);
    }

    #[test]
    fn ties_keep_index_order() {
        let scores = [0.2, 0.5, 0.2, 0.5, 0.1];
        assert_eq!(top_k_indices(&scores, 5), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn nan_sorts_last() {
        let scores = [f32::NAN, 0.3, 0.7];
        assert_eq!(top_k_indices(&scores, 3), vec![2, 1, 0]);
    }

    #[test]
    fn k_larger_than_scores_is_clamped() {
        assert_eq!(top_k_indices(&[0.1, 0.2], 5), vec![1, 0]);
        assert!(rank(&[], &LabelTable::baybayin(), 5).is_empty());
    }

    #[test]
    fn confidence_is_reported_in_percent() {
        let p = Prediction {
            rank: 1,
            index: 0,
            label: "a".into(),
            score: 0.8731,
        };
        approx::assert_relative_eq!(p.confidence_percent(), 87.31, epsilon = 1e-4);
    }

    #[test]
    fn prediction_serializes_with_label() {
        let top = rank(&[0.1, 0.6, 0.3], &LabelTable::baybayin(), 1);
        let json = serde_json::to_value(&top[0]).unwrap();
        assert_eq!(json["label"], "b");
        assert_eq!(json["index"], 1);
        assert_eq!(json["rank"], 1);
    }
}
