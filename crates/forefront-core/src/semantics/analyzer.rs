use super::{Semantics, Specificity};
use regex::Regex;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:[-+#'][\p{L}\p{N}+#]*)*")
        .expect("WORD_RE is a compile-time constant")
});

/// Base-form verbs recognised as the request's action
const ACTIONS: &[&str] = &[
    "generate", "create", "write", "draw", "design", "build", "make", "compose", "produce",
    "render", "research", "compare", "investigate", "analyze", "analyse", "debug", "review",
    "evaluate", "assess", "explain", "teach", "optimize", "optimise", "improve", "refactor",
    "summarize", "summarise", "translate", "find", "list", "plan", "fix", "test", "deploy",
    "convert", "describe", "show", "tell", "learn",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "these", "those", "my", "our", "your", "some", "me", "us", "how",
    "what", "why", "when", "where",
];

const BOUNDARIES: &[&str] = &[
    "for", "with", "at", "on", "in", "to", "that", "which", "and", "or", "then", "from", "about",
    "using", "by", "into", "so", "while", "but",
];

const VAGUE: &[&str] = &[
    "something", "stuff", "things", "anything", "whatever", "somehow", "etc", "maybe", "some",
];

/// Lowercase spellings mapped onto their display form
const TECH_ENTITIES: &[(&str, &str)] = &[
    ("react", "React"),
    ("vue", "Vue"),
    ("angular", "Angular"),
    ("svelte", "Svelte"),
    ("python", "Python"),
    ("rust", "Rust"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("golang", "Go"),
    ("java", "Java"),
    ("sql", "SQL"),
    ("postgres", "PostgreSQL"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("graphql", "GraphQL"),
    ("kubernetes", "Kubernetes"),
    ("docker", "Docker"),
    ("aws", "AWS"),
    ("redis", "Redis"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
];

const MAX_SUBJECT_WORDS: usize = 4;

/// Extract semantic features from a query. Never fails.
#[must_use]
pub fn analyze_semantics(query: &str) -> Semantics {
    let words: Vec<&str> = WORD_RE.find_iter(query).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return Semantics::empty();
    }
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

    let found = lower
        .iter()
        .enumerate()
        .find_map(|(i, w)| base_action(w).map(|action| (i, action.to_string())));

    let (action_index, primary_action) = found.unwrap_or_else(|| (0, lower[0].clone()));
    let primary_subject = extract_subject(&words[action_index + 1..], &lower[action_index + 1..]);
    let entities = extract_entities(&words, &lower);
    let specificity = score_specificity(query, &lower, entities.len());

    Semantics {
        primary_action,
        primary_subject,
        entities,
        specificity,
    }
}

/// Map an inflected verb onto its base form in [`ACTIONS`]
fn base_action(word: &str) -> Option<&'static str> {
    let lookup = |candidate: &str| ACTIONS.iter().copied().find(|a| *a == candidate);

    if let Some(found) = lookup(word) {
        return Some(found);
    }

    for suffix in ["ing", "ed", "es", "s"] {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.len() < 2 {
            continue;
        }
        if let Some(found) = lookup(stem).or_else(|| lookup(&format!("{stem}e"))) {
            return Some(found);
        }
        // debugging -> debugg -> debug
        let mut chars = stem.chars().rev();
        if let (Some(last), Some(prev)) = (chars.next(), chars.next()) {
            if last == prev {
                if let Some(found) = lookup(&stem[..stem.len() - last.len_utf8()]) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn extract_subject(words: &[&str], lower: &[String]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut content_words = 0;

    for (word, low) in words.iter().zip(lower) {
        let low = low.as_str();
        if low == "of" && content_words > 0 {
            parts.push(*word);
            continue;
        }
        if DETERMINERS.contains(&low) {
            continue;
        }
        if BOUNDARIES.contains(&low) {
            if content_words > 0 {
                break;
            }
            continue;
        }
        parts.push(*word);
        content_words += 1;
        if content_words == MAX_SUBJECT_WORDS {
            break;
        }
    }

    while parts.last().is_some_and(|p| p.eq_ignore_ascii_case("of")) {
        parts.pop();
    }
    parts.join(" ")
}

fn extract_entities(words: &[&str], lower: &[String]) -> Vec<String> {
    fn flush(run: &mut Vec<&str>, entities: &mut Vec<String>) {
        if !run.is_empty() {
            entities.push(run.join(" "));
            run.clear();
        }
    }

    let mut entities: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for (i, (word, low)) in words.iter().zip(lower).enumerate() {
        if let Some((_, display)) = TECH_ENTITIES.iter().find(|(key, _)| *key == low.as_str()) {
            flush(&mut run, &mut entities);
            entities.push((*display).to_string());
            continue;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        let low = low.as_str();
        let stop = low == "i" || DETERMINERS.contains(&low) || BOUNDARIES.contains(&low);
        if i > 0 && capitalized && !stop {
            run.push(*word);
        } else {
            flush(&mut run, &mut entities);
        }
    }
    flush(&mut run, &mut entities);

    let mut seen: Vec<String> = Vec::new();
    entities.retain(|e| {
        let key = e.to_lowercase();
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
    entities
}

fn score_specificity(query: &str, lower: &[String], entity_count: usize) -> Specificity {
    let mut score: i32 = 0;

    match lower.len() {
        n if n <= 3 => score -= 1,
        n if n >= 20 => score += 2,
        n if n >= 12 => score += 1,
        _ => {}
    }
    if entity_count >= 1 {
        score += 1;
    }
    if entity_count >= 3 {
        score += 1;
    }
    if query.chars().any(|c| c.is_ascii_digit()) || query.contains('"') {
        score += 1;
    }
    if lower.iter().any(|w| VAGUE.contains(&w.as_str())) {
        score -= 1;
    }

    match score {
        i32::MIN..=0 => Specificity::Low,
        1 | 2 => Specificity::Medium,
        _ => Specificity::High,
    }
}
