use crate::domain::model::{VoiceAction, VoiceCommand, VoiceParameters};
use crate::utils::error::{ImpactError, Result};
use url::form_urlencoded;

// Entries ending in '*' match any token with that prefix; entries with a
// space match consecutive tokens.
const BARCODE_WORDS: &[&str] = &["barcode", "scan", "scanner"];
const STORAGE_WORDS: &[&str] = &["store", "storing", "storage", "keep"];
const FIND_WORDS: &[&str] = &["find", "near", "nearby", "donat*", "food bank", "pantry"];
const POST_WORDS: &[&str] = &["post", "posting", "share", "sharing", "leftover", "leftovers", "give away"];
const WEAK_STORAGE_WORDS: &[&str] = &["fresh", "tips"];
const HOME_WORDS: &[&str] = &["home", "main", "start", "back"];

// Words that introduce the food name in storage questions.
const FOOD_MARKERS: &[&str] = &["store", "storing", "keep", "keeping", "for", "about"];
const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "my", "some", "of", "to", "please", "fresh", "longer", "properly", "best",
    "tips", "i", "do", "should", "can", "it", "how", "long", "way", "in", "fridge", "freezer",
];

impl VoiceAction {
    /// App path for this action. `food` only affects `GetStorageTips`.
    pub fn route(self, food: Option<&str>) -> String {
        match self {
            VoiceAction::GetStorageTips => match food.filter(|f| !f.trim().is_empty()) {
                Some(food) => {
                    let query: String = form_urlencoded::Serializer::new(String::new())
                        .append_pair("food", food.trim())
                        .finish();
                    format!("/storage-tips?{}", query)
                }
                None => "/storage-tips".to_string(),
            },
            VoiceAction::PostLeftovers => "/post-leftovers".to_string(),
            VoiceAction::FindFoodNearMe => "/find-food".to_string(),
            VoiceAction::ScanBarcode => "/scan-barcode".to_string(),
            VoiceAction::NavigateHome => "/".to_string(),
        }
    }
}

impl VoiceCommand {
    pub fn route(&self) -> String {
        let food = self.parameters.as_ref().and_then(|p| p.food.as_deref());
        self.action.route(food)
    }
}

/// Keyword-based interpretation used when no model is available.
///
/// Keywords are matched against whole tokens, in priority order: barcode,
/// storage verbs, find, post, then the weak storage words ("fresh", "tips").
/// Anything that matches nothing falls back to `NavigateHome`.
pub fn interpret_offline(utterance: &str) -> Result<VoiceCommand> {
    let text = utterance.trim().to_lowercase();
    if text.is_empty() {
        return Err(ImpactError::invalid_input(
            "voice_command",
            utterance,
            "Voice command cannot be empty",
        ));
    }

    let tokens = tokenize(&text);

    let action = if contains_any(&tokens, BARCODE_WORDS) {
        VoiceAction::ScanBarcode
    } else if contains_any(&tokens, STORAGE_WORDS) {
        VoiceAction::GetStorageTips
    } else if contains_any(&tokens, FIND_WORDS) {
        VoiceAction::FindFoodNearMe
    } else if contains_any(&tokens, POST_WORDS) {
        VoiceAction::PostLeftovers
    } else if contains_any(&tokens, WEAK_STORAGE_WORDS) {
        VoiceAction::GetStorageTips
    } else {
        if !contains_any(&tokens, HOME_WORDS) {
            tracing::debug!("No keyword matched '{}', defaulting to home", text);
        }
        VoiceAction::NavigateHome
    };

    let parameters = match action {
        VoiceAction::GetStorageTips => extract_food(&tokens).map(|food| VoiceParameters {
            food: Some(food),
        }),
        _ => None,
    };

    Ok(VoiceCommand { action, parameters })
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .filter(|w| !w.is_empty())
        .collect()
}

fn keyword_matches(tokens: &[&str], keyword: &str) -> bool {
    if let Some(stem) = keyword.strip_suffix('*') {
        return tokens.iter().any(|t| t.starts_with(stem));
    }
    let parts: Vec<&str> = keyword.split(' ').collect();
    tokens.windows(parts.len()).any(|window| window == parts.as_slice())
}

fn contains_any(tokens: &[&str], keywords: &[&str]) -> bool {
    keywords.iter().any(|k| keyword_matches(tokens, k))
}

/// Food name taken from the first marker followed by a non-filler word,
/// up to the next marker.
fn extract_food(tokens: &[&str]) -> Option<String> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| FOOD_MARKERS.contains(*t))
        .find_map(|(i, _)| {
            let food: Vec<&str> = tokens[i + 1..]
                .iter()
                .copied()
                .take_while(|t| !FOOD_MARKERS.contains(t))
                .filter(|t| !FILLER_WORDS.contains(t))
                .collect();
            if food.is_empty() {
                None
            } else {
                Some(food.join(" "))
            }
        })
}
