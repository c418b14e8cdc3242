//! Rule-based intent classification
//!
//! Deterministic: the same query always yields the same intent. Cue lists are
//! matched against lowercased alphanumeric tokens; multi-word cues are matched
//! against the space-joined token stream.

use super::types::{
    Capabilities, ClassificationOutcome, Complexity, DeliveryFormat, Domain, Intent, TaskType,
};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9]+").expect("TOKEN_RE is a compile-time constant")
});

// ============================================================================
// Cue tables
// ============================================================================

struct DomainCues {
    domain: Domain,
    strong: &'static [&'static str],
    weak: &'static [&'static str],
}

/// Order doubles as the tie-break when two domains score equally.
const DOMAIN_CUES: &[DomainCues] = &[
    DomainCues {
        domain: Domain::Technical,
        strong: &[
            "code", "debug", "debugging", "bug", "bugs", "crash", "crashes", "error", "function",
            "api", "database", "sql", "query", "component", "microservices", "architecture",
            "kubernetes", "docker", "deploy", "deployment", "server", "backend", "frontend",
            "refactor", "compiler", "algorithm", "performance", "latency", "endpoint", "codebase",
        ],
        weak: &[
            "python", "rust", "javascript", "typescript", "java", "react", "vue", "angular",
            "node", "system", "platform", "app", "application", "software", "build",
        ],
    },
    DomainCues {
        domain: Domain::Analytical,
        strong: &[
            "research", "compare", "comparison", "analyze", "analyse", "analysis", "data",
            "statistics", "trends", "investigate", "versus", "vs", "evaluate", "survey", "metrics",
        ],
        weak: &["pros", "cons", "market", "report", "study", "findings", "evidence"],
    },
    DomainCues {
        domain: Domain::Learning,
        strong: &[
            "explain", "teach", "teaching", "tutorial", "lesson", "lessons", "course", "basics",
            "beginner", "beginners", "curriculum", "quiz",
        ],
        weak: &["learn", "learning", "understand", "how", "why", "what"],
    },
    DomainCues {
        domain: Domain::Creative,
        strong: &[
            "story", "poem", "novel", "fiction", "lyrics", "song", "image", "picture", "photo",
            "illustration", "drawing", "draw", "paint", "painting", "artwork", "logo", "poster",
            "infographic", "video", "animation", "character", "screenplay", "slogan",
        ],
        weak: &[
            "write", "create", "generate", "design", "compose", "art", "style", "creative",
            "presentation",
        ],
    },
];

const TASK_CUES: &[(TaskType, &[&str])] = &[
    (
        TaskType::Research,
        &["research", "compare", "investigate", "survey"],
    ),
    (
        TaskType::Generation,
        &[
            "generate", "create", "write", "draw", "design", "build", "make", "compose", "produce",
            "render",
        ],
    ),
    (
        TaskType::Teaching,
        &["explain", "teach", "teaching", "tutorial", "lesson"],
    ),
    (
        TaskType::Optimization,
        &["optimize", "optimise", "improve", "refactor", "speed"],
    ),
    (
        TaskType::Analysis,
        &["analyze", "analyse", "debug", "review", "evaluate", "assess", "diagnose", "audit"],
    ),
];

const MULTIMEDIA_CUES: &[&str] = &[
    "video", "videos", "animation", "animated", "presentation", "slides", "slideshow",
    "infographic", "podcast", "audio", "multimedia",
];
const VISUAL_CUES: &[&str] = &[
    "image", "images", "picture", "photo", "illustration", "drawing", "draw", "logo", "poster",
    "artwork", "diagram", "chart", "visualization", "visualize", "wallpaper",
];
const INTERACTIVE_CUES: &[&str] = &[
    "interactive", "quiz", "game", "simulation", "exercise", "exercises", "playground",
];
const CODE_CUES: &[&str] = &[
    "code", "function", "sql", "query", "script", "component", "api", "class", "program",
    "snippet", "codebase", "endpoint", "regex",
];

const CONNECTOR_PHRASES: &[&str] = &["then", "after that", "followed by", "afterwards"];
const BREADTH_PHRASES: &[&str] = &[
    "entire", "whole", "comprehensive", "complete guide", "from the basics", "from scratch",
    "end to end", "everything",
];
const EXPERT_CUES: &[&str] = &[
    "microservices", "architecture", "distributed", "scalable", "enterprise", "kubernetes",
    "compiler", "concurrency", "consensus", "sharding",
];
const VAGUE_CUES: &[&str] = &[
    "something", "stuff", "things", "anything", "whatever", "somehow", "etc", "maybe",
];
const RESEARCH_NEED_PHRASES: &[&str] = &[
    "research", "compare", "comparison", "latest", "current", "recent", "news", "trends",
    "statistics", "look up", "investigate", "sources", "versus", "vs",
];
const TUTORIAL_CUES: &[&str] = &["tutorial", "course", "lesson", "lessons", "curriculum"];
const ARCHITECTURE_CUES: &[&str] = &["architecture", "architect"];

// ============================================================================
// Token view
// ============================================================================

/// Lowercased token stream of a query
pub(crate) struct QueryTokens {
    tokens: Vec<String>,
    joined: String,
}

impl QueryTokens {
    pub(crate) fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let tokens: Vec<String> = TOKEN_RE
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();
        let joined = format!(" {} ", tokens.join(" "));
        Self { tokens, joined }
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn has_word(&self, word: &str) -> bool {
        self.tokens.iter().any(|t| t == word)
    }

    /// Matches single words and space-separated phrases alike
    pub(crate) fn has_phrase(&self, phrase: &str) -> bool {
        self.joined.contains(&format!(" {phrase} "))
    }

    pub(crate) fn count_any(&self, cues: &[&str]) -> usize {
        cues.iter().filter(|c| self.has_phrase(c)).count()
    }

    pub(crate) fn any(&self, cues: &[&str]) -> bool {
        cues.iter().any(|c| self.has_phrase(c))
    }

    fn first_position(&self, cues: &[&str]) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| cues.contains(&t.as_str()))
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Deterministic keyword-and-score classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    /// Create a new classifier
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify a raw query. Never fails; empty input yields the trivial default.
    #[must_use]
    pub fn classify(&self, query: &str) -> Intent {
        let tokens = QueryTokens::new(query);
        if tokens.is_empty() {
            return Intent::trivial_default();
        }

        let (domain, confidence) = detect_domain(&tokens);
        let task_type = detect_task_type(&tokens, domain);
        let delivery_format = detect_delivery_format(&tokens);
        let complexity = score_complexity(&tokens, domain, task_type);
        let capabilities = detect_capabilities(&tokens, domain, task_type, delivery_format);

        Intent {
            domain,
            task_type,
            complexity,
            delivery_format,
            capabilities,
            confidence,
            outcome: ClassificationOutcome::Classified,
        }
    }
}

fn detect_domain(tokens: &QueryTokens) -> (Domain, f64) {
    let scored: Vec<(Domain, usize, usize)> = DOMAIN_CUES
        .iter()
        .map(|cues| {
            let strong = tokens.count_any(cues.strong);
            let weak = tokens.count_any(cues.weak);
            (cues.domain, strong, strong * 3 + weak)
        })
        .collect();

    let strong_domains = scored.iter().filter(|(_, strong, _)| *strong > 0).count();
    if strong_domains >= 2 {
        return (Domain::Hybrid, 0.6);
    }

    let mut ranked = scored;
    // stable sort keeps table order for ties
    ranked.sort_by(|a, b| b.2.cmp(&a.2));

    match ranked.as_slice() {
        [(domain, _, top), rest @ ..] if *top > 0 => {
            let runner_up = rest.first().map_or(0, |r| r.2);
            let margin = (top - runner_up) as f64;
            (*domain, (0.5 + 0.1 * margin).min(0.95))
        }
        _ => (Domain::Technical, 0.3),
    }
}

fn detect_task_type(tokens: &QueryTokens, domain: Domain) -> TaskType {
    match domain {
        Domain::Creative => return TaskType::Generation,
        Domain::Learning => return TaskType::Teaching,
        _ => {}
    }

    let earliest = TASK_CUES
        .iter()
        .filter_map(|(task, cues)| tokens.first_position(cues).map(|pos| (pos, *task)))
        .min_by_key(|(pos, _)| *pos);

    match (earliest, domain) {
        (Some((_, task)), _) => task,
        (None, Domain::Hybrid) => TaskType::Generation,
        (None, _) => TaskType::Analysis,
    }
}

fn detect_delivery_format(tokens: &QueryTokens) -> DeliveryFormat {
    if tokens.any(MULTIMEDIA_CUES) {
        DeliveryFormat::Multimedia
    } else if tokens.any(VISUAL_CUES) {
        DeliveryFormat::Visual
    } else if tokens.any(INTERACTIVE_CUES) || tokens.has_phrase("hands on") {
        DeliveryFormat::Interactive
    } else if tokens.any(CODE_CUES) {
        DeliveryFormat::Code
    } else {
        DeliveryFormat::Text
    }
}

fn score_complexity(tokens: &QueryTokens, domain: Domain, task_type: TaskType) -> Complexity {
    let expert_hits = tokens.count_any(EXPERT_CUES);
    if expert_hits >= 2 {
        return Complexity::Expert;
    }

    let mut score = 0usize;

    let distinct_tasks = TASK_CUES
        .iter()
        .filter(|(_, cues)| tokens.any(cues))
        .count();
    score += match distinct_tasks {
        0 | 1 => 0,
        2 => 2,
        _ => 3,
    };

    if tokens.any(CONNECTOR_PHRASES) {
        score += 1;
    }
    score += tokens.count_any(BREADTH_PHRASES).min(2);
    if expert_hits == 1 {
        score += 3;
    }
    if tokens.any(VAGUE_CUES) {
        score += 1;
    }
    score += match tokens.len() {
        n if n > 25 => 2,
        n if n > 12 => 1,
        _ => 0,
    };
    if domain == Domain::Hybrid {
        score += 1;
    }
    if matches!(task_type, TaskType::Optimization) || tokens.has_word("debug") {
        score += 1;
    }

    match score {
        0 if tokens.len() <= 6 => Complexity::Trivial,
        0..=2 => Complexity::Moderate,
        3 | 4 => Complexity::Complex,
        _ => Complexity::Expert,
    }
}

fn detect_capabilities(
    tokens: &QueryTokens,
    domain: Domain,
    task_type: TaskType,
    delivery: DeliveryFormat,
) -> Capabilities {
    let needs_research = tokens.any(RESEARCH_NEED_PHRASES);

    let needs_multi_model_consensus = domain == Domain::Hybrid
        || (matches!(domain, Domain::Technical | Domain::Analytical)
            && task_type == TaskType::Analysis)
        || tokens.any(ARCHITECTURE_CUES);

    let needs_optimization = matches!(delivery, DeliveryFormat::Visual | DeliveryFormat::Multimedia)
        || (domain == Domain::Learning && tokens.any(TUTORIAL_CUES))
        || (domain == Domain::Technical && task_type == TaskType::Optimization)
        || tokens.has_word("prompt");

    Capabilities {
        needs_research,
        needs_multi_model_consensus,
        needs_optimization,
    }
}
