//! Perceived Stress Scale (PSS-10) scoring

use serde::Serialize;

use crate::errors::{CalcError, CalcResult};

/// Number of items on the PSS-10
pub const PSS_ITEMS: usize = 10;

/// Highest answer on the 0-4 frequency scale
pub const PSS_MAX_ANSWER: u8 = 4;

/// Positively worded items (1-based); scored in reverse
pub const REVERSED_ITEMS: [usize; 4] = [4, 5, 7, 8];

/// Items making up the perceived helplessness sub-scale (1-based)
pub const HELPLESSNESS_ITEMS: [usize; 6] = [1, 2, 3, 6, 9, 10];

/// Scored PSS-10 questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PssScore {
    /// 0-40
    pub total: u8,
    /// Perceived helplessness, 0-24
    pub helplessness: u8,
    /// Reverse-scored perceived self-efficacy, 0-16
    pub self_efficacy: u8,
}

/// Item score after reverse-scoring, for a 1-based item number
fn item_score(item: usize, answer: u8) -> u8 {
    if REVERSED_ITEMS.contains(&item) {
        PSS_MAX_ANSWER - answer
    } else {
        answer
    }
}

/// Score raw answers (0 = never ... 4 = very often) in questionnaire order
pub fn score_pss(answers: &[u8]) -> CalcResult<PssScore> {
    if answers.len() != PSS_ITEMS {
        return Err(CalcError::invalid(
            "answers",
            format!("expected {PSS_ITEMS} answers, got {}", answers.len()),
        ));
    }
    if let Some(bad) = answers.iter().find(|&&a| a > PSS_MAX_ANSWER) {
        return Err(CalcError::invalid("answers", format!("answer {bad} is outside 0-4")));
    }

    let (helplessness, self_efficacy) = answers
        .iter()
        .enumerate()
        .map(|(index, &answer)| (index + 1, item_score(index + 1, answer)))
        .fold((0u8, 0u8), |(helpless, efficacy), (item, score)| {
            if HELPLESSNESS_ITEMS.contains(&item) {
                (helpless + score, efficacy)
            } else {
                (helpless, efficacy + score)
            }
        });

    Ok(PssScore {
        total: helplessness + self_efficacy,
        helplessness,
        self_efficacy,
    })
}
