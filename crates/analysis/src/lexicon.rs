//! Lexicon-based compound polarity scoring.
//!
//! Each known word or emoji carries a valence on a `[-4, 4]` scale.  Valences are
//! adjusted for intensifiers, negation, capitalised emphasis and "but"
//! contrast, summed, boosted by exclamation marks, then squashed into
//! `[-1.0, 1.0]` with `s / sqrt(s² + ALPHA)`.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::sentiment::PolarityScorer;

const ALPHA: f64 = 15.0;
const BOOST: f64 = 0.293;
const CAPS_BOOST: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("accomplished", 1.9),
    ("adorable", 2.2),
    ("agree", 1.5),
    ("agreed", 1.1),
    ("amazed", 2.2),
    ("amazing", 2.8),
    ("amused", 1.6),
    ("appreciate", 2.0),
    ("appreciated", 2.3),
    ("awesome", 3.1),
    ("banger", 2.0),
    ("beautiful", 2.9),
    ("beautifully", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("bless", 1.8),
    ("blessed", 2.9),
    ("bravo", 2.3),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("charming", 2.3),
    ("cheers", 2.1),
    ("clever", 2.0),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("cool", 1.3),
    ("cute", 2.0),
    ("delight", 2.9),
    ("delightful", 2.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("enjoying", 2.4),
    ("entertaining", 2.0),
    ("epic", 2.0),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fabulous", 2.4),
    ("fantastic", 2.6),
    ("fascinating", 2.2),
    ("favorite", 2.0),
    ("favourite", 2.0),
    ("fine", 0.8),
    ("flawless", 2.3),
    ("fun", 2.3),
    ("funny", 1.9),
    ("gem", 1.7),
    ("genius", 1.9),
    ("glad", 2.0),
    ("goated", 2.0),
    ("gold", 1.6),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("greatest", 3.2),
    ("haha", 2.0),
    ("hahaha", 2.0),
    ("happy", 2.7),
    ("heartwarming", 2.5),
    ("helped", 1.7),
    ("helpful", 1.8),
    ("hero", 2.6),
    ("hilarious", 1.7),
    ("hope", 1.9),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("incredible", 2.5),
    ("informative", 1.8),
    ("insightful", 1.9),
    ("inspired", 2.2),
    ("inspiring", 2.2),
    ("interesting", 1.7),
    ("joy", 2.8),
    ("kind", 2.4),
    ("laugh", 2.6),
    ("laughing", 2.2),
    ("legend", 1.6),
    ("legendary", 2.2),
    ("like", 1.5),
    ("liked", 1.8),
    ("lmao", 2.0),
    ("lol", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("loving", 2.9),
    ("lucky", 1.8),
    ("magnificent", 2.9),
    ("masterpiece", 3.0),
    ("nice", 1.8),
    ("outstanding", 3.0),
    ("peace", 2.5),
    ("perfect", 2.7),
    ("perfection", 2.7),
    ("pleased", 1.9),
    ("pleasure", 2.7),
    ("proud", 2.1),
    ("pure", 1.1),
    ("recommend", 1.5),
    ("relatable", 1.3),
    ("respect", 2.1),
    ("satisfying", 2.0),
    ("smart", 1.7),
    ("solid", 1.4),
    ("special", 1.7),
    ("spectacular", 2.6),
    ("stunning", 2.6),
    ("subscribed", 1.5),
    ("success", 2.7),
    ("superb", 3.1),
    ("support", 1.7),
    ("supportive", 2.0),
    ("sweet", 2.0),
    ("talent", 1.9),
    ("talented", 2.3),
    ("thank", 1.5),
    ("thankful", 2.7),
    ("thanks", 1.9),
    ("thx", 1.5),
    ("true", 1.3),
    ("underrated", 1.2),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("wholesome", 2.2),
    ("win", 2.8),
    ("winner", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("wow", 2.8),
    ("yay", 2.4),
    ("yeah", 1.2),
    ("yes", 1.7),
    // negative
    ("abysmal", -2.6),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("ashamed", -2.1),
    ("awful", -2.0),
    ("awkward", -0.6),
    ("bad", -2.5),
    ("biased", -1.1),
    ("bored", -1.1),
    ("boring", -1.3),
    ("broken", -2.1),
    ("clickbait", -1.8),
    ("confused", -1.3),
    ("confusing", -0.9),
    ("crap", -1.6),
    ("cringe", -1.9),
    ("cringy", -1.8),
    ("cry", -2.1),
    ("crying", -2.1),
    ("damn", -1.7),
    ("depressing", -1.6),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("disaster", -3.1),
    ("disgrace", -2.2),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("disliked", -1.7),
    ("dull", -1.7),
    ("dumb", -2.3),
    ("embarrassing", -1.6),
    ("evil", -3.4),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fake", -2.1),
    ("garbage", -2.3),
    ("gross", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("hating", -2.3),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("hypocrite", -2.1),
    ("idiot", -2.3),
    ("ignorant", -1.1),
    ("lame", -1.8),
    ("lazy", -1.4),
    ("liar", -2.6),
    ("lie", -1.6),
    ("lies", -1.8),
    ("mediocre", -1.0),
    ("mess", -1.5),
    ("misleading", -1.9),
    ("no", -1.2),
    ("nonsense", -1.7),
    ("offensive", -2.2),
    ("overrated", -1.3),
    ("pain", -2.3),
    ("painful", -1.9),
    ("pathetic", -2.2),
    ("poor", -2.1),
    ("problem", -1.7),
    ("ridiculous", -1.5),
    ("rubbish", -2.1),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scam", -2.5),
    ("scary", -2.2),
    ("shame", -2.1),
    ("shit", -2.6),
    ("sick", -2.3),
    ("spam", -1.5),
    ("stupid", -2.4),
    ("suck", -1.9),
    ("sucks", -1.5),
    ("terrible", -2.5),
    ("toxic", -2.4),
    ("tragic", -3.4),
    ("trash", -1.5),
    ("ugly", -2.3),
    ("unfortunately", -1.5),
    ("unfunny", -1.2),
    ("unwatchable", -2.0),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("weak", -1.9),
    ("weird", -0.7),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
    ("yikes", -1.0),
];

/// Emoji carry a valence of their own and are scored as separate tokens,
/// even when glued to a word ("wow😂").
const EMOJI: &[(&str, f64)] = &[
    ("😂", 1.9),
    ("🤣", 1.9),
    ("😀", 1.7),
    ("😃", 1.9),
    ("😄", 2.0),
    ("😁", 1.8),
    ("😆", 1.7),
    ("😊", 2.1),
    ("🙂", 1.2),
    ("😍", 2.7),
    ("🥰", 2.6),
    ("😘", 1.9),
    ("😎", 1.5),
    ("🤩", 2.4),
    ("🥳", 2.2),
    ("👍", 1.8),
    ("👏", 1.8),
    ("🙌", 1.8),
    ("🙏", 1.5),
    ("💯", 1.9),
    ("🔥", 1.6),
    ("❤", 2.6),
    ("♥", 2.4),
    ("💕", 2.4),
    ("💖", 2.4),
    ("💗", 2.3),
    ("💙", 2.2),
    ("💚", 2.2),
    ("💛", 2.2),
    ("💜", 2.2),
    ("🖤", 1.5),
    ("🤍", 2.0),
    ("✨", 1.2),
    ("⭐", 1.3),
    ("🏆", 1.9),
    ("🎉", 2.0),
    ("💪", 1.6),
    ("😭", -1.7),
    ("😢", -1.9),
    ("😞", -2.0),
    ("😔", -1.6),
    ("😟", -1.6),
    ("😠", -2.4),
    ("😡", -2.6),
    ("🤬", -2.8),
    ("😤", -1.6),
    ("😒", -1.5),
    ("🙄", -1.2),
    ("😩", -1.8),
    ("😫", -1.8),
    ("🤮", -2.5),
    ("🤢", -2.0),
    ("💩", -1.6),
    ("👎", -1.9),
    ("💔", -2.3),
    ("😱", -1.5),
    ("😬", -0.8),
    ("🥱", -1.0),
    ("😴", -0.8),
];

const INTENSIFIERS: &[&str] = &[
    "absolutely",
    "extremely",
    "incredibly",
    "really",
    "so",
    "super",
    "totally",
    "very",
];

const DAMPENERS: &[&str] = &["barely", "kinda", "kindof", "slightly", "somewhat", "sorta"];

const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "didnt", "doesnt", "dont", "isnt", "never", "nor", "not",
    "nothing", "wasnt", "without", "wont",
];

/// Stateless scorer; every call depends only on the text passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        compound(text)
    }
}

fn valences() -> &'static HashMap<&'static str, f64> {
    static TABLE: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    TABLE.get_or_init(|| LEXICON.iter().chain(EMOJI).copied().collect())
}

fn valence_of(key: &str) -> Option<f64> {
    valences().get(key).copied()
}

fn is_scored_emoji(c: char) -> bool {
    let mut buf = [0u8; 4];
    let key: &str = c.encode_utf8(&mut buf);
    EMOJI.iter().any(|(entry, _)| *entry == key)
}

struct Token<'a> {
    raw: &'a str,
    key: String,
}

fn push_word<'a>(tokens: &mut Vec<Token<'a>>, word: &'a str) {
    let raw = word.trim_matches(|c: char| !c.is_alphanumeric());
    if raw.is_empty() {
        return;
    }
    tokens.push(Token {
        raw,
        // "don't" and "dont" share a key
        key: raw.to_lowercase().replace(['\'', '’'], ""),
    });
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let mut start = 0;
        for (i, c) in word.char_indices() {
            if !is_scored_emoji(c) {
                continue;
            }
            push_word(&mut tokens, &word[start..i]);
            let end = i + c.len_utf8();
            tokens.push(Token {
                raw: &word[i..end],
                key: word[i..end].to_string(),
            });
            start = end;
        }
        push_word(&mut tokens, &word[start..]);
    }
    tokens
}

fn is_shouted(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn compound(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    // Capitalised emphasis only counts when the comment is not shouted
    // end to end.
    let shouted = tokens.iter().filter(|t| is_shouted(t.raw)).count();
    let mixed_case = shouted > 0 && shouted < tokens.len();

    let but_index = tokens.iter().position(|t| t.key == "but");

    let mut sum = 0.0;
    for (i, token) in tokens.iter().enumerate() {
        let Some(mut valence) = valence_of(&token.key) else {
            continue;
        };

        if mixed_case && is_shouted(token.raw) {
            valence += CAPS_BOOST * valence.signum();
        }

        if i > 0 {
            let prev = tokens[i - 1].key.as_str();
            if INTENSIFIERS.contains(&prev) {
                valence += BOOST * valence.signum();
            } else if DAMPENERS.contains(&prev) {
                valence -= BOOST * valence.signum();
            }
        }

        let window = &tokens[i.saturating_sub(3)..i];
        if window.iter().any(|t| NEGATIONS.contains(&t.key.as_str())) {
            valence *= NEGATION_SCALAR;
        }

        match but_index {
            Some(b) if i < b => valence *= 0.5,
            Some(b) if i > b => valence *= 1.5,
            _ => {}
        }

        sum += valence;
    }

    if sum != 0.0 {
        let bangs = text.chars().filter(|&c| c == '!').count().min(MAX_EXCLAMATIONS);
        sum += bangs as f64 * EXCLAMATION_BOOST * sum.signum();
    }

    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
