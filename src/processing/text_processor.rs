//! Text normalization shared by every comparator

use crate::config::StopWordLanguage;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    punctuation_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(StopWordLanguage::Russian)
    }
}

impl TextProcessor {
    pub fn new(language: StopWordLanguage) -> Self {
        let stop_words = match language {
            StopWordLanguage::Russian => RUSSIAN_STOP_WORDS.iter().copied().collect(),
            StopWordLanguage::English => ENGLISH_STOP_WORDS.iter().copied().collect(),
        };

        let punctuation_regex = Regex::new(r"[^\w\s]").expect("Invalid punctuation regex");

        Self {
            stop_words,
            punctuation_regex,
        }
    }

    /// Lowercase, drop punctuation and stop words, join with single spaces
    pub fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    /// Normalized tokens in their original order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.punctuation_regex.replace_all(&lowered, "");

        stripped
            .unicode_words()
            .filter(|word| !self.stop_words.contains(word))
            .map(|word| word.to_string())
            .collect()
    }

    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokenize(text).into_iter().collect()
    }
}

const RUSSIAN_STOP_WORDS: &[&str] = &[
    "а", "будем", "будет", "будете", "будешь", "буду", "будут", "будучи", "будь", "будьте",
    "бы", "был", "была", "были", "было", "быть", "в", "вам", "вами", "вас", "весь", "во",
    "вот", "все", "всё", "всего", "всей", "всем", "всеми", "всему", "всех", "всею", "всея",
    "всю", "вся", "вы", "да", "для", "до", "его", "едим", "едят", "ее", "её", "ей", "ел",
    "ела", "ем", "ему", "емъ", "если", "ест", "есть", "ешь", "еще", "ещё", "ею", "же",
    "за", "и", "из", "или", "им", "ими", "имъ", "их", "к", "как", "кем", "ко", "когда",
    "кого", "ком", "кому", "комья", "которая", "которого", "которое", "которой", "котором",
    "которому", "которою", "которую", "которые", "который", "которым", "которыми",
    "которых", "кто", "меня", "мне", "мной", "мною", "мог", "моги", "могите", "могла",
    "могли", "могло", "могу", "могут", "мое", "моё", "моего", "моей", "моем", "моём",
    "моему", "моею", "можем", "может", "можете", "можешь", "мои", "мой", "моим", "моими",
    "моих", "мочь", "мою", "моя", "мы", "на", "нам", "нами", "нас", "наса", "наш", "наша",
    "наше", "нашего", "нашей", "нашем", "нашему", "нашею", "наши", "нашим", "нашими",
    "наших", "нашу", "не", "него", "нее", "неё", "ней", "нем", "нём", "нему", "нет", "нею",
    "ним", "ними", "них", "но", "о", "об", "один", "одна", "одни", "одним", "одними",
    "одних", "одно", "одного", "одной", "одном", "одному", "одною", "одну", "он", "она",
    "оне", "они", "оно", "от", "по", "при", "с", "сам", "сама", "сами", "самим", "самими",
    "самих", "само", "самого", "самом", "самому", "саму", "свое", "своё", "своего",
    "своей", "своем", "своём", "своему", "своею", "свои", "свой", "своим", "своими",
    "своих", "свою", "своя", "себе", "себя", "собой", "собою", "та", "так", "такая",
    "такие", "таким", "такими", "таких", "такого", "такое", "такой", "таком", "такому",
    "такою", "такую", "те", "тебе", "тебя", "тем", "теми", "тех", "то", "тобой", "тобою",
    "того", "той", "только", "том", "тому", "тот", "тою", "ту", "ты", "у", "уже", "чего",
    "чем", "чём", "чему", "что", "чтобы", "эта", "эти", "этим", "этими", "этих", "это",
    "этого", "этой", "этом", "этому", "этот", "этою", "эту", "я",
];

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];
