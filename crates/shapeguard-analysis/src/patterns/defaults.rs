//! Built-in pattern definitions.

use shapeguard_core::types::{
    Constraint, FormatPattern, PatternStructure, Section, SectionFormat, Severity, ValidationRule,
};

/// Ids of the built-in patterns, in definition order.
pub const DEFAULT_PATTERN_IDS: &[&str] = &[
    "comparison-table",
    "definition",
    "list",
    "process",
    "code-example",
    "architecture",
    "pros-cons",
    "troubleshooting",
    "best-practices",
];

/// The nine built-in patterns.
pub fn default_patterns() -> Vec<FormatPattern> {
    vec![
        comparison_table(),
        definition(),
        list(),
        process(),
        code_example(),
        architecture(),
        pros_cons(),
        troubleshooting(),
        best_practices(),
    ]
}

fn rule(pattern: &str, suffix: &str, severity: Severity, predicate: &str, description: &str) -> ValidationRule {
    ValidationRule::new(format!("{pattern}:{suffix}"), pattern, severity, predicate)
        .with_description(description)
}

fn no_placeholders(pattern: &str) -> ValidationRule {
    rule(
        pattern,
        "no-placeholders",
        Severity::Error,
        "no-placeholder-text",
        "Answer contains template placeholder text",
    )
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn comparison_table() -> FormatPattern {
    let id = "comparison-table";
    FormatPattern {
        id: id.into(),
        name: "Comparison Table".into(),
        description: "Side-by-side comparison of two or more options in a markdown table".into(),
        keywords: keywords(&[
            "difference between",
            "difference",
            "compare",
            "comparison",
            "vs",
            "versus",
            "differ",
            "contrast",
        ]),
        priority: 10,
        structure: PatternStructure {
            sections: vec![Section::new("comparison", SectionFormat::Table)
                .with(Constraint::MinColumns(3))
                .with(Constraint::MinRows(3))
                .with(Constraint::ConsistentColumns)
                .with(Constraint::NoEmptyCells)
                .with(Constraint::ComparisonHeader)],
            rules: vec![
                no_placeholders(id),
                rule(id, "no-raw-html", Severity::Error, "no-raw-html", "Table is written in raw HTML"),
            ],
        },
        template: "| Feature | Option A | Option B |\n|---------|----------|----------|\n| ... | ... | ... |".into(),
        examples: vec![
            "| Aspect | REST | GraphQL |\n|--------|------|---------|\n| Endpoints | Many | One |\n| Fetching | Fixed | Client-defined |\n| Caching | HTTP-native | Custom |".into(),
        ],
    }
}

fn definition() -> FormatPattern {
    let id = "definition";
    FormatPattern {
        id: id.into(),
        name: "Definition".into(),
        description: "One-sentence definition followed by 3-5 key characteristics".into(),
        keywords: keywords(&["what is", "define", "definition", "meaning of", "what does", "what are"]),
        priority: 5,
        structure: PatternStructure {
            sections: vec![Section::new("definition", SectionFormat::Text)
                .with(Constraint::SingleSentenceOpener)
                .with(Constraint::BlankLineAfterOpener)
                .with(Constraint::MinItems(3))
                .with(Constraint::MaxItems(5))],
            rules: vec![
                no_placeholders(id),
                rule(
                    id,
                    "reasonable-length",
                    Severity::Error,
                    "reasonable-length",
                    "Definition is too short to be useful",
                ),
            ],
        },
        template: "X is a Y that does Z.\n\n- Characteristic one\n- Characteristic two\n- Characteristic three".into(),
        examples: vec![
            "A mutex is a lock that gives one thread exclusive access to shared data.\n\n- Guards a critical section\n- Blocks contending threads\n- Must be released to avoid deadlock".into(),
        ],
    }
}

fn list() -> FormatPattern {
    let id = "list";
    FormatPattern {
        id: id.into(),
        name: "List".into(),
        description: "Bulleted or numbered enumeration of items".into(),
        keywords: keywords(&[
            "list",
            "types of",
            "examples of",
            "kinds of",
            "name some",
            "what are some",
            "enumerate",
        ]),
        priority: 6,
        structure: PatternStructure {
            sections: vec![Section::new("items", SectionFormat::List)
                .with(Constraint::MinItems(3))
                .with(Constraint::MaxItems(15))
                .with(Constraint::ConsistentBullets)
                .with(Constraint::SequentialNumbering)
                .with(Constraint::MaxNestingDepth(3))
                .with(Constraint::MaxSentencesPerItem(2))],
            rules: vec![no_placeholders(id)],
        },
        template: "- Item one\n- Item two\n- Item three".into(),
        examples: vec!["- Stack\n- Queue\n- Hash map\n- Binary tree".into()],
    }
}

fn process() -> FormatPattern {
    let id = "process";
    FormatPattern {
        id: id.into(),
        name: "Process".into(),
        description: "Numbered, sequential, action-led steps".into(),
        keywords: keywords(&[
            "how to",
            "steps",
            "process",
            "procedure",
            "how do i",
            "how do you",
            "workflow",
            "setup",
            "configure",
        ]),
        priority: 8,
        structure: PatternStructure {
            sections: vec![
                Section::new("steps", SectionFormat::Process)
                    .with(Constraint::ActionVerbs)
                    .with(Constraint::NoVagueLanguage)
                    .with(Constraint::MinSteps(2))
                    .with(Constraint::MaxSteps(15))
                    .with(Constraint::SequentialNumbering),
                Section::new("commands", SectionFormat::Code)
                    .optional()
                    .with(Constraint::RequireLanguageTag),
            ],
            rules: vec![no_placeholders(id)],
        },
        template: "1. First action\n2. Second action\n3. Third action".into(),
        examples: vec!["1. Install the CLI\n2. Configure credentials\n3. Run the deploy command".into()],
    }
}

fn code_example() -> FormatPattern {
    let id = "code-example";
    FormatPattern {
        id: id.into(),
        name: "Code Example".into(),
        description: "Fenced, language-tagged, runnable code with a short explanation".into(),
        keywords: keywords(&[
            "code",
            "example",
            "implement",
            "snippet",
            "function",
            "syntax",
            "write a",
        ]),
        priority: 7,
        structure: PatternStructure {
            sections: vec![Section::new("code", SectionFormat::Code)
                .with(Constraint::RequireLanguageTag)
                .with(Constraint::BalancedBrackets)
                .with(Constraint::NoPlaceholders)
                .with(Constraint::MinLines(1))
                .with(Constraint::MaxLines(60))
                .with(Constraint::CommentThreshold(5))],
            rules: vec![rule(
                id,
                "no-raw-html",
                Severity::Error,
                "no-raw-html",
                "Explanation embeds raw HTML",
            )],
        },
        template: "```language\n// code\n```".into(),
        examples: vec![
            "```python\ndef add(a, b):\n    # Sum two numbers\n    return a + b\n```".into(),
        ],
    }
}

fn architecture() -> FormatPattern {
    let id = "architecture";
    FormatPattern {
        id: id.into(),
        name: "Architecture".into(),
        description: "System diagram with an explanation of the components".into(),
        keywords: keywords(&[
            "architecture",
            "design",
            "diagram",
            "system design",
            "components",
            "high level",
        ]),
        priority: 7,
        structure: PatternStructure {
            sections: vec![
                Section::new("diagram", SectionFormat::Diagram)
                    .with(Constraint::MaxNodes(20))
                    .with(Constraint::MinExplanationLength(50)),
                Section::new("components", SectionFormat::List)
                    .optional()
                    .with(Constraint::MinItems(2)),
            ],
            rules: vec![no_placeholders(id)],
        },
        template: "```mermaid\ngraph TD\n  A[Client] --> B[Service]\n  B --> C[(Database)]\n```\n\nExplain how the components interact.".into(),
        examples: vec![
            "```mermaid\ngraph LR\n  Browser --> Gateway\n  Gateway --> Orders\n  Orders --> Postgres\n```\n\nThe gateway routes requests to the orders service, which persists state in Postgres.".into(),
        ],
    }
}

fn pros_cons() -> FormatPattern {
    let id = "pros-cons";
    FormatPattern {
        id: id.into(),
        name: "Pros and Cons".into(),
        description: "Balanced advantages and disadvantages under separate headings".into(),
        keywords: keywords(&[
            "pros and cons",
            "advantages",
            "disadvantages",
            "benefits",
            "drawbacks",
            "trade-offs",
            "tradeoffs",
        ]),
        priority: 9,
        structure: PatternStructure {
            sections: vec![Section::new("pros-cons", SectionFormat::ProsCons)
                .with(Constraint::MaxImbalanceRatio(3.0))],
            rules: vec![no_placeholders(id)],
        },
        template: "## Pros\n- Advantage\n\n## Cons\n- Disadvantage".into(),
        examples: vec![
            "## Pros\n- Simple deployment\n- Strong consistency\n\n## Cons\n- Harder to scale writes\n- Single point of failure".into(),
        ],
    }
}

fn troubleshooting() -> FormatPattern {
    let id = "troubleshooting";
    FormatPattern {
        id: id.into(),
        name: "Troubleshooting".into(),
        description: "Problem statement, likely causes and numbered solutions".into(),
        keywords: keywords(&[
            "troubleshoot",
            "error",
            "fix",
            "debug",
            "not working",
            "issue",
            "problem",
            "fails",
        ]),
        priority: 8,
        structure: PatternStructure {
            sections: vec![Section::new("troubleshooting", SectionFormat::Troubleshooting)
                .with(Constraint::MinProblemLength(20))
                .with(Constraint::MinCauses(2))],
            rules: vec![no_placeholders(id)],
        },
        template: "## Problem\nDescribe the symptom.\n\n## Causes\n- Cause one\n- Cause two\n\n## Solutions\n1. First fix\n2. Second fix".into(),
        examples: vec![
            "## Problem\nThe build fails with a linker error after upgrading.\n\n## Causes\n- Stale build cache\n- Mismatched toolchain\n\n## Solutions\n1. Clear the cache\n2. Reinstall the toolchain".into(),
        ],
    }
}

fn best_practices() -> FormatPattern {
    let id = "best-practices";
    FormatPattern {
        id: id.into(),
        name: "Best Practices".into(),
        description: "Short, actionable recommendations as a list".into(),
        keywords: keywords(&["best practices", "recommendations", "guidelines", "tips", "best practice"]),
        priority: 6,
        structure: PatternStructure {
            sections: vec![Section::new("practices", SectionFormat::List)
                .with(Constraint::MinItems(3))
                .with(Constraint::MaxItems(10))
                .with(Constraint::ConsistentBullets)
                .with(Constraint::MaxSentencesPerItem(3))],
            rules: vec![rule(
                id,
                "reasonable-length",
                Severity::Error,
                "reasonable-length",
                "Recommendations are too short to act on",
            )],
        },
        template: "- Practice one\n- Practice two\n- Practice three".into(),
        examples: vec!["- Pin dependency versions\n- Run tests in CI\n- Review every change".into()],
    }
}
