//! Pairing predictions with settled results.

use edge_core::types::{GameResult, PredictionRecord};

#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchedPrediction<'a> {
    pub(crate) prediction: &'a PredictionRecord,
    pub(crate) correct: bool,
}

/// For each prediction, the first result for the same game. Predictions
/// without a result are dropped.
pub(crate) fn match_predictions<'a>(
    predictions: &'a [PredictionRecord],
    results: &[GameResult],
) -> Vec<MatchedPrediction<'a>> {
    predictions
        .iter()
        .filter_map(|prediction| {
            results
                .iter()
                .find(|r| prediction.matches(r))
                .map(|r| MatchedPrediction {
                    prediction,
                    correct: r.prediction_correct,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_result_wins_and_unmatched_dropped() {
        let preds = vec![
            PredictionRecord::new("Georgia", "Florida"),
            PredictionRecord::new("Ohio State", "Michigan"),
        ];
        let results = vec![
            GameResult::new("georgia", "florida", true),
            GameResult::new("Georgia", "Florida", false),
        ];
        let matched = match_predictions(&preds, &results);
        assert_eq!(matched.len(), 1);
        assert!(matched[0].correct);
        assert_eq!(matched[0].prediction.home_team, "Georgia");
    }
}
