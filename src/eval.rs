use crate::config::Number;
use crate::tokenizer::tokenize;
use std::collections::HashSet;

/// Filtered from the answer side only; context tokens are never filtered.
const STOPWORDS: [&str; 16] = [
    "the", "is", "a", "an", "and", "or", "of", "to", "in", "on", "it", "this", "that", "based",
    "here", "answer",
];

/// Scores how well an answer is supported by retrieved context. A proxy
/// metric for hallucination risk: the fraction of the answer's significant
/// tokens that also appear in the context.
#[derive(Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Returns a score in [0, 1] rounded to 2 decimal places. An answer
    /// with no significant tokens scores 0.0, there is nothing to verify.
    pub fn faithfulness(&self, answer_text: &str, context_text: &str) -> Number {
        let answer_tokens: HashSet<String> = tokenize(answer_text).into_iter().collect();
        let context_tokens: HashSet<String> = tokenize(context_text).into_iter().collect();

        let significant: Vec<&String> = answer_tokens
            .iter()
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .collect();

        if significant.is_empty() {
            return 0.0;
        }

        let supported = significant
            .iter()
            .filter(|t| context_tokens.contains(t.as_str()))
            .count();

        let score = supported as Number / significant.len() as Number;
        (score * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_supported_answer_scores_one() {
        let eval = Evaluator::new();
        let score = eval.faithfulness("sky blue", "The sky is blue today.");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn unsupported_answer_scores_zero() {
        let eval = Evaluator::new();
        assert_eq!(eval.faithfulness("quantum entanglement", "The sky is blue."), 0.0);
    }

    #[test]
    fn stopword_only_answer_scores_zero() {
        let eval = Evaluator::new();
        assert_eq!(eval.faithfulness("the is a an and or", "anything at all"), 0.0);
    }

    #[test]
    fn empty_context_scores_zero_for_any_real_answer() {
        let eval = Evaluator::new();
        assert_eq!(eval.faithfulness("windows", ""), 0.0);
    }

    #[test]
    fn partial_support_rounds_to_two_decimals() {
        let eval = Evaluator::new();
        // 1 of 3 significant tokens supported: 0.333... rounds to 0.33.
        let score = eval.faithfulness("alpha beta gamma", "only alpha appears");
        assert_eq!(score, 0.33);
    }

    #[test]
    fn growing_context_never_lowers_the_score() {
        let eval = Evaluator::new();
        let answer = "alpha beta gamma";
        let small = eval.faithfulness(answer, "alpha");
        let bigger = eval.faithfulness(answer, "alpha beta");
        let biggest = eval.faithfulness(answer, "alpha beta gamma delta");
        assert!(small <= bigger && bigger <= biggest);
    }

    #[test]
    fn duplicate_tokens_count_once() {
        let eval = Evaluator::new();
        let a = eval.faithfulness("alpha alpha beta", "alpha");
        let b = eval.faithfulness("alpha beta", "alpha");
        assert_eq!(a, b);
    }

    #[test]
    fn context_side_stopwords_still_support_the_answer() {
        // The stopword list only filters the answer; "windows" in context
        // is found even when surrounded by stopwords.
        let eval = Evaluator::new();
        assert_eq!(eval.faithfulness("windows", "it is on the windows"), 1.0);
    }
}
