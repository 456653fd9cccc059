use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use super::{DependencyParser, ParserError, Token, DEP_AUXPASS};

/// Forms of "to be" that can introduce a passive construction.
const BE_FORMS: &[&str] = &["am", "is", "are", "was", "were", "be", "been", "being"];

/// Words allowed between the auxiliary and the participle ("was not eaten", "is quickly sold").
const INTERVENING_ADVERBS: &[&str] = &[
    "not", "never", "also", "already", "just", "often", "always", "still", "then", "now",
];

/// Common irregular past participles.
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "arisen", "awoken", "beaten", "become", "begun", "bent", "bitten", "blown", "born",
    "borne", "bought", "bound", "broken", "brought", "built", "burnt", "caught", "chosen",
    "cut", "dealt", "done", "drawn", "driven", "drunk", "dug", "eaten", "fallen", "fed",
    "felt", "fought", "found", "forbidden", "forgiven", "forgotten", "frozen", "given",
    "gone", "grown", "hidden", "hit", "held", "hung", "hurt", "kept", "known", "laid",
    "led", "left", "lent", "lost", "made", "meant", "met", "paid", "put", "read", "ridden",
    "run", "rung", "said", "seen", "sent", "set", "shaken", "shot", "shown", "shut",
    "sold", "sought", "spent", "spoken", "spread", "stolen", "struck", "sung", "sunk",
    "swept", "sworn", "taken", "taught", "thought", "thrown", "told", "torn", "understood",
    "undertaken", "upset", "woken", "won", "worn", "woven", "written",
];

/// "-ed" words that are not participles.
const ED_EXCEPTIONS: &[&str] = &[
    "bed", "red", "need", "seed", "speed", "feed", "shed", "indeed", "naked", "wicked",
    "sacred", "hundred", "kindred", "rugged", "ragged", "crooked", "beloved",
];

/// Participles that usually act as adjectives after "to be" ("I was tired").
/// They only count as passive when an agent follows ("surprised by the result").
const PREDICATE_ADJECTIVES: &[&str] = &[
    "alarmed", "amazed", "amused", "annoyed", "ashamed", "astonished", "bored",
    "complicated", "concerned", "confused", "crowded", "delighted", "depressed",
    "determined", "disappointed", "disgusted", "embarrassed", "excited", "exhausted",
    "experienced", "fascinated", "frightened", "frustrated", "interested", "involved",
    "married", "overwhelmed", "pleased", "prepared", "qualified", "relaxed", "relieved",
    "satisfied", "scared", "shocked", "skilled", "stressed", "surprised", "talented",
    "terrified", "thrilled", "tired", "upset", "worried",
];

/// Pure-Rust fallback parser. Tokenizes on Unicode word boundaries and
/// recognizes a single relation: a form of "to be" followed (optionally across
/// adverbs) by a past participle is labelled `auxpass`, headed by the participle.
/// All other tokens carry an empty label and head themselves.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedParser;

impl RuleBasedParser {
    pub fn tokenize(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        // Walk byte offsets forward once, converting to char offsets as we go.
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        for (byte_idx, word) in text.unicode_word_indices() {
            char_cursor += text[byte_cursor..byte_idx].chars().count();
            byte_cursor = byte_idx;

            let head = tokens.len();
            tokens.push(Token {
                text: word.to_string(),
                idx: char_cursor,
                dep: String::new(),
                head,
            });
        }

        tokens
    }

    fn label_passives(tokens: &mut [Token]) {
        for i in 0..tokens.len() {
            if !is_be_form(&tokens[i].text) {
                continue;
            }

            let mut j = i + 1;
            while j < tokens.len() && is_intervening_adverb(&tokens[j].text) {
                j += 1;
            }

            if j >= tokens.len() || !is_past_participle(&tokens[j].text) {
                continue;
            }

            let agent_follows = tokens
                .get(j + 1)
                .is_some_and(|next| next.text.eq_ignore_ascii_case("by"));
            if is_predicate_adjective(&tokens[j].text) && !agent_follows {
                continue;
            }

            tokens[i].dep = DEP_AUXPASS.to_string();
            tokens[i].head = j;
        }
    }
}

#[async_trait]
impl DependencyParser for RuleBasedParser {
    async fn parse(&self, text: &str) -> Result<Vec<Token>, ParserError> {
        let mut tokens = Self::tokenize(text);
        Self::label_passives(&mut tokens);
        Ok(tokens)
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

fn is_be_form(word: &str) -> bool {
    BE_FORMS.iter().any(|b| b.eq_ignore_ascii_case(word))
}

fn is_intervening_adverb(word: &str) -> bool {
    let lower = word.to_lowercase();
    INTERVENING_ADVERBS.contains(&lower.as_str()) || (lower.len() > 4 && lower.ends_with("ly"))
}

fn is_predicate_adjective(word: &str) -> bool {
    PREDICATE_ADJECTIVES.contains(&word.to_lowercase().as_str())
}

fn is_past_participle(word: &str) -> bool {
    let lower = word.to_lowercase();
    if IRREGULAR_PARTICIPLES.contains(&lower.as_str()) {
        return true;
    }
    lower.len() > 3 && lower.ends_with("ed") && !ED_EXCEPTIONS.contains(&lower.as_str())
}
