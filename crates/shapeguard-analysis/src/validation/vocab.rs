//! Word lists the checkers consult.

use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

/// Imperative verbs accepted as step openers.
pub const ACTION_VERBS: &[&str] = &[
    "add", "allow", "apply", "assign", "build", "call", "change", "check", "choose", "clear",
    "click", "clone", "close", "commit", "compile", "configure", "confirm", "connect", "copy",
    "create", "define", "delete", "deploy", "disable", "download", "edit", "enable", "ensure",
    "enter", "execute", "export", "extract", "fetch", "find", "fix", "generate", "go", "grant",
    "identify", "import", "increase", "initialize", "insert", "inspect", "install", "invoke",
    "launch", "list", "load", "locate", "log", "login", "make", "merge", "migrate", "monitor",
    "mount", "move", "navigate", "open", "pass", "pull", "push", "read", "reboot", "rebuild",
    "reduce", "refresh", "register", "reinstall", "reload", "remove", "rename", "replace",
    "restart", "restore", "retry", "review", "roll", "run", "save", "scale", "search", "select",
    "send", "set", "setup", "start", "stop", "submit", "switch", "tag", "test", "update",
    "upgrade", "upload", "use", "validate", "verify", "wait", "write",
];

pub fn is_action_verb(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    ACTION_VERBS.binary_search(&lower.as_str()).is_ok()
}

/// Hedging phrases that weaken instructions.
pub const VAGUE_TERMS: &[&str] = &[
    "might", "maybe", "perhaps", "possibly", "probably", "try to", "somehow", "something",
    "stuff", "things", "kind of", "sort of", "etc", "and so on", "whatever",
];

/// Words that indicate a problem statement describes observable symptoms.
pub const SYMPTOM_TERMS: &[&str] = &[
    "error", "errors", "fail", "fails", "failed", "failing", "failure", "crash", "crashes",
    "slow", "timeout", "times out", "hang", "hangs", "freeze", "freezes", "exception",
    "not working", "doesn't work", "does not work", "cannot", "can't", "unable", "broken",
    "returns", "throws", "stuck", "refused", "denied", "missing", "warning", "500", "404",
];

/// Fence info strings recognized as programming languages.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "bash", "c", "c++", "clojure", "cpp", "cs", "csharp", "css", "dart", "diff", "docker",
    "dockerfile", "elixir", "erlang", "go", "golang", "graphql", "groovy", "haskell", "hcl",
    "html", "ini", "java", "javascript", "js", "json", "jsx", "kotlin", "lua", "makefile",
    "markdown", "md", "nginx", "objc", "perl", "php", "plaintext", "powershell", "proto",
    "protobuf", "ps1", "py", "python", "r", "rb", "rs", "ruby", "rust", "scala", "scss", "sh",
    "shell", "sql", "swift", "terraform", "text", "toml", "ts", "tsx", "txt", "typescript",
    "xml", "yaml", "yml", "zsh",
];

pub fn is_known_language(lang: &str) -> bool {
    let lower = lang.to_ascii_lowercase();
    KNOWN_LANGUAGES.binary_search(&lower.as_str()).is_ok() || is_diagram_language(&lower)
}

/// Fence info strings that denote a diagram.
pub const DIAGRAM_LANGUAGES: &[&str] = &["ascii", "d2", "dot", "graphviz", "mermaid", "plantuml"];

pub fn is_diagram_language(lang: &str) -> bool {
    DIAGRAM_LANGUAGES.contains(&lang.to_ascii_lowercase().as_str())
}

/// Leading keywords of common diagram dialects.
pub const DIAGRAM_KEYWORDS: &[&str] = &[
    "graph", "flowchart", "sequencediagram", "classdiagram", "statediagram", "erdiagram",
    "gantt", "pie", "journey", "mindmap", "digraph", "@startuml", "c4context",
];

/// Diagram kinds that suit system architecture.
pub const ARCHITECTURE_DIAGRAM_KEYWORDS: &[&str] = &[
    "graph", "flowchart", "classdiagram", "sequencediagram", "c4context", "digraph", "@startuml",
];

/// Connectors that draw an edge between nodes.
pub const EDGE_TOKENS: &[&str] = &["-->", "->", "==>", "-.->", "<--", "<-", "<->", "=>", "---", "--"];

/// Cell contents that stand in for real data.
pub const PLACEHOLDER_CELLS: &[&str] = &["", "...", "tbd", "todo", "?", "xxx", "placeholder"];

pub fn is_placeholder_cell(cell: &str) -> bool {
    let lower = cell.trim().to_ascii_lowercase();
    PLACEHOLDER_CELLS.contains(&lower.as_str())
}

/// First-column headers that name the compared dimension.
pub const COMPARISON_HEADERS: &[&str] = &[
    "feature", "aspect", "criteria", "criterion", "attribute", "property", "dimension",
    "category", "characteristic",
];

/// Filler words ignored when extracting common override reasons.
pub const STOPWORDS: &[&str] = &[
    "about", "after", "also", "because", "been", "before", "being", "could", "does", "doing",
    "each", "from", "have", "having", "here", "into", "just", "more", "most", "must", "need",
    "needs", "only", "other", "over", "same", "should", "some", "such", "than", "that", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "under", "very",
    "want", "were", "what", "when", "where", "which", "while", "will", "with", "would", "your",
];

static VAGUE_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| build_matcher(VAGUE_TERMS));
static SYMPTOM_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| build_matcher(SYMPTOM_TERMS));

fn build_matcher(terms: &[&str]) -> AhoCorasick {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(terms)
        .expect("static term list")
}

/// Terms from `matcher` that occur in `text` on word boundaries, in order of
/// first appearance, without duplicates.
fn whole_word_hits(matcher: &AhoCorasick, terms: &'static [&'static str], text: &str) -> Vec<&'static str> {
    let bytes = text.as_bytes();
    let mut hits: Vec<&'static str> = Vec::new();
    for m in matcher.find_iter(text) {
        let before_ok = m.start() == 0 || !bytes[m.start() - 1].is_ascii_alphanumeric();
        let after_ok = m.end() == bytes.len() || !bytes[m.end()].is_ascii_alphanumeric();
        if before_ok && after_ok {
            let term = terms[m.pattern().as_usize()];
            if !hits.contains(&term) {
                hits.push(term);
            }
        }
    }
    hits
}

/// Vague terms present in `text`.
pub fn vague_terms_in(text: &str) -> Vec<&'static str> {
    whole_word_hits(&VAGUE_MATCHER, VAGUE_TERMS, text)
}

pub fn mentions_symptoms(text: &str) -> bool {
    !whole_word_hits(&SYMPTOM_MATCHER, SYMPTOM_TERMS, text).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_lists_support_binary_search() {
        assert!(ACTION_VERBS.windows(2).all(|w| w[0] < w[1]));
        assert!(KNOWN_LANGUAGES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn vague_terms_respect_word_boundaries() {
        assert_eq!(vague_terms_in("fetch the data"), Vec::<&str>::new());
        assert_eq!(vague_terms_in("You might try to restart"), vec!["might", "try to"]);
    }
}
