//! Part-of-speech tagging capability and a lexicon-driven default tagger

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Coarse part-of-speech classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PosTag {
    pub fn is_nominal(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
    pub is_stop: bool,
}

/// Anything that can split text into POS-annotated tokens.
///
/// Implementations must be deterministic: the same text always yields the same tokens.
pub trait PosTagger {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

impl<T: PosTagger + ?Sized> PosTagger for Box<T> {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

impl<T: PosTagger + ?Sized> PosTagger for &T {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "what", "which", "whose",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "we", "us", "our",
    "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "who", "whom", "whoever",
    "anything", "something", "everything", "nothing", "someone", "anyone", "everyone", "nobody",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over", "under",
    "about", "above", "across", "after", "against", "along", "among", "around", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "during", "except", "inside",
    "near", "off", "out", "outside", "through", "throughout", "toward", "towards", "upon",
    "within", "without", "via", "per", "like", "up", "down",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "though",
    "whereas", "unless", "whether", "than", "as", "&",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
    "first", "second", "third",
];

const VERBS: &[&str] = &[
    "build", "built", "develop", "create", "implement", "maintain", "ensure", "deliver", "drive",
    "own", "collaborate", "communicate", "write", "wrote", "written", "deploy", "improve",
    "optimize", "optimise", "analyze", "analyse", "help", "use", "join", "seek", "apply",
    "require", "prefer", "know", "knew", "understand", "make", "made", "take", "took", "get",
    "got", "give", "gave", "provide", "include", "lead", "led", "run", "ran", "grow", "grew",
    "work", "partner", "mentor", "architect", "scale", "ship", "debug", "test", "automate",
    "translate", "define", "identify", "participate", "contribute", "coordinate", "oversee",
    "reduce", "increase", "launch", "migrate", "integrate", "monitor", "troubleshoot", "solve",
    "thrive", "excel", "enjoy", "love", "want", "need", "see", "say", "think", "become", "became",
    "spent", "taught", "brought", "kept", "held", "won", "sold", "began", "begun",
];

const ADJECTIVES: &[&str] = &[
    "strong", "good", "great", "excellent", "exceptional", "senior", "junior", "new", "large",
    "small", "high", "low", "solid", "proven", "deep", "fast", "remote", "familiar", "able",
    "relevant", "related", "other", "several", "various", "similar", "full", "entire", "key",
    "main", "effective", "minimum", "least", "best", "better", "top", "hands-on",
    "cross-functional", "modern", "complex", "scalable", "reliable", "robust", "current",
    "recent", "multiple", "successful", "independent", "excited", "passionate", "comfortable",
    "fluent", "proficient", "advanced", "basic", "preferred", "required", "desired", "ideal",
    "plus", "bonus", "real", "open", "big", "early", "late", "long", "short", "quick", "clear",
    "clean", "detail-oriented", "self-motivated", "self-starting", "fast-paced", "well-known",
    "same", "different", "own", "many", "much", "more", "most", "few", "less",
];

const ADVERBS: &[&str] = &[
    "also", "well", "very", "not", "always", "often", "never", "usually", "ideally",
    "preferably", "together", "already", "still", "just", "only", "even", "again", "further",
    "once", "ever", "then", "there", "here", "when", "where", "why", "how", "too", "quite",
    "rather", "almost", "soon", "now", "etc",
];

/// Nouns the suffix rules would otherwise misread as verbs or adjectives
const SUFFIX_EXCEPTIONS: &[&str] = &[
    "engineering", "testing", "marketing", "programming", "accounting", "computing",
    "networking", "training", "learning", "modeling", "modelling", "scheduling", "budgeting",
    "consulting", "manufacturing", "planning", "processing", "banking", "building", "hosting",
    "logging", "caching", "routing", "pricing", "recruiting", "writing", "branding",
    "supply", "assembly", "family", "anomaly", "monopoly", "executive", "initiative",
    "objective", "representative", "alternative", "incentive", "detective", "directive",
    "cable", "table", "variable", "deliverable", "receivable", "payable", "bible",
    "red", "bed", "shed", "seed", "speed", "feed", "need", "breed", "greed", "hundred",
    "material", "proposal", "portal", "rental", "journal", "terminal", "signal", "capital",
    "hospital", "approval", "referral", "renewal", "removal", "retrieval", "tutorial",
    "interval", "credential", "animal", "festival", "editorial", "principal", "arrival",
];

/// Stop words in addition to the closed-class lexicons
const STOP_WORDS: &[&str] = &[
    "also", "very", "just", "only", "etc", "e.g", "i.e", "more", "most", "much", "many", "few",
    "other", "own", "same", "too", "then", "there", "here", "when", "where", "why", "how",
    "again", "further", "once", "ever", "even", "back", "well", "part", "name", "side", "top",
    "front", "bottom", "amount", "call", "due", "empty", "full", "last", "least", "made",
    "make", "move", "next", "put", "quite", "rather", "really", "regarding", "say", "see",
    "serious", "several", "show", "take", "used", "using", "various", "whole", "not", "now",
    "always", "often", "never", "already", "still", "together", "almost", "soon", "get", "go",
    "done", "become", "became", "whatever", "whenever", "wherever", "however", "therefore",
    "thus", "hence", "otherwise", "else", "nevertheless", "meanwhile", "moreover", "yes", "no",
    "please", "via", "per", "within", "without", "upon", "among",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordShape {
    Lower,
    Capitalized,
    /// All-caps acronyms and camel/mixed case such as `SQL`, `JavaScript`, `iOS`
    Marked,
    Other,
}

impl WordShape {
    fn of(word: &str) -> Self {
        let mut chars = word.chars().filter(|c| c.is_alphabetic());
        let first = match chars.next() {
            Some(c) => c,
            None => return WordShape::Other,
        };
        let rest_has_upper = chars.any(|c| c.is_uppercase());

        if rest_has_upper {
            WordShape::Marked
        } else if first.is_uppercase() {
            WordShape::Capitalized
        } else {
            WordShape::Lower
        }
    }
}

/// Deterministic tagger built from closed-class word lists, a small open-class
/// lexicon, suffix rules and word shape.
///
/// It stands in for a statistical tagger: good enough to separate content nouns
/// from function words and common verbs/adjectives, nothing more.
pub struct LexiconTagger {
    stop_words: HashSet<&'static str>,
    determiners: HashSet<&'static str>,
    pronouns: HashSet<&'static str>,
    adpositions: HashSet<&'static str>,
    conjunctions: HashSet<&'static str>,
    auxiliaries: HashSet<&'static str>,
    number_words: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    suffix_exceptions: HashSet<&'static str>,
    compound_regex: Regex,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let set = |words: &[&'static str]| words.iter().copied().collect::<HashSet<_>>();

        let mut stop_words = set(STOP_WORDS);
        for list in [DETERMINERS, PRONOUNS, ADPOSITIONS, CONJUNCTIONS, AUXILIARIES] {
            stop_words.extend(list.iter().copied());
        }
        stop_words.extend(NUMBER_WORDS.iter().copied());

        // Tokens like C++, C# or cross-functional that word segmentation would split apart
        let compound_regex =
            Regex::new(r"^(?:[A-Za-z][A-Za-z0-9]*(?:\+\+|#)|[A-Za-z]+(?:-[A-Za-z]+)+)$")
                .expect("Invalid compound token regex");

        Self {
            stop_words,
            determiners: set(DETERMINERS),
            pronouns: set(PRONOUNS),
            adpositions: set(ADPOSITIONS),
            conjunctions: set(CONJUNCTIONS),
            auxiliaries: set(AUXILIARIES),
            number_words: set(NUMBER_WORDS),
            verbs: set(VERBS),
            adjectives: set(ADJECTIVES),
            adverbs: set(ADVERBS),
            suffix_exceptions: set(SUFFIX_EXCEPTIONS),
            compound_regex,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str())
    }

    /// Tag a single word. `sentence_start` disables the capitalization cue.
    pub fn tag_word(&self, word: &str, sentence_start: bool) -> PosTag {
        if !word.chars().any(|c| c.is_alphanumeric()) {
            return PosTag::Punctuation;
        }

        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if let Some(tag) = self.closed_class(lower) {
            return tag;
        }
        if Self::is_numeric(word) || self.number_words.contains(lower) {
            return PosTag::Numeral;
        }

        let shape = WordShape::of(word);
        match shape {
            WordShape::Marked => return PosTag::ProperNoun,
            WordShape::Capitalized if !sentence_start => return PosTag::ProperNoun,
            _ => {}
        }

        if let Some(tag) = self.open_class(lower) {
            return tag;
        }
        if let Some(tag) = self.suffix_rule(lower) {
            return tag;
        }

        if shape == WordShape::Capitalized {
            PosTag::ProperNoun
        } else {
            PosTag::Noun
        }
    }

    fn closed_class(&self, lower: &str) -> Option<PosTag> {
        if self.determiners.contains(lower) {
            Some(PosTag::Determiner)
        } else if self.pronouns.contains(lower) {
            Some(PosTag::Pronoun)
        } else if self.adpositions.contains(lower) {
            Some(PosTag::Adposition)
        } else if self.conjunctions.contains(lower) {
            Some(PosTag::Conjunction)
        } else if self.auxiliaries.contains(lower) {
            Some(PosTag::Verb)
        } else {
            None
        }
    }

    fn open_class(&self, lower: &str) -> Option<PosTag> {
        if self.verbs.contains(lower) {
            Some(PosTag::Verb)
        } else if self.adjectives.contains(lower) {
            Some(PosTag::Adjective)
        } else if self.adverbs.contains(lower) {
            Some(PosTag::Adverb)
        } else {
            None
        }
    }

    fn suffix_rule(&self, lower: &str) -> Option<PosTag> {
        if self.suffix_exceptions.contains(lower) {
            return None;
        }

        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ly") {
            return Some(PosTag::Adverb);
        }
        if len > 5 && lower.ends_with("ing") {
            return Some(PosTag::Verb);
        }
        if len > 4 && lower.ends_with("ed") {
            return Some(PosTag::Verb);
        }
        if len > 5 && (lower.ends_with("ize") || lower.ends_with("izes")) {
            return Some(PosTag::Verb);
        }

        const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "al", "less", "ive"];
        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            return Some(PosTag::Adjective);
        }

        None
    }

    fn is_numeric(word: &str) -> bool {
        word.chars().next().is_some_and(|c| c.is_ascii_digit())
            && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    }

    fn push_token(&self, tokens: &mut Vec<Token>, text: &str, sentence_start: bool) {
        let pos = self.tag_word(text, sentence_start);
        tokens.push(Token {
            text: text.to_string(),
            pos,
            is_stop: self.is_stop_word(text),
        });
    }
}

fn is_wrapping_punctuation(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '(' | ')' | '"' | '\'')
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

impl PosTagger for LexiconTagger {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        // Resumes are line oriented; every line opens a new "sentence"
        for line in text.lines() {
            let mut sentence_start = true;

            for chunk in line.split_whitespace() {
                let rest = chunk.trim_start_matches(is_wrapping_punctuation);
                let core = rest.trim_end_matches(|c: char| {
                    is_wrapping_punctuation(c) || is_sentence_end(c)
                });
                if self.compound_regex.is_match(core) {
                    self.push_token(&mut tokens, core, sentence_start);
                    sentence_start = false;

                    let trailing = &rest[core.len()..];
                    if !trailing.is_empty() {
                        self.push_token(&mut tokens, trailing, false);
                        sentence_start = trailing.contains(is_sentence_end);
                    }
                    continue;
                }

                for segment in chunk.split_word_bounds() {
                    if segment.trim().is_empty() {
                        continue;
                    }
                    let is_word = segment.chars().any(|c| c.is_alphanumeric());
                    self.push_token(&mut tokens, segment, sentence_start);

                    if is_word {
                        sentence_start = false;
                    } else if segment.contains(is_sentence_end) {
                        sentence_start = true;
                    }
                }
            }
        }

        tokens
    }
}
