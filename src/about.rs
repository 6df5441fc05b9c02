// About-section parser.
// Best-effort segmentation of a profile README into titled sections; not a
// markdown parser. Anything unusable degrades to the fixed fallback.

/// One item inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    Text(String),
    /// Horizontal-rule marker carried through for the presentation layer.
    Rule,
}

/// A heading-delimited block.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub items: Vec<SectionItem>,
}

/// Parsed about content. `greeting` and `intro` are only populated by the
/// fallback; the parser itself produces sections.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutContent {
    pub greeting: String,
    pub intro: String,
    pub sections: Vec<Section>,
}

impl AboutContent {
    pub fn is_empty(&self) -> bool {
        self.greeting.is_empty() && self.intro.is_empty() && self.sections.is_empty()
    }

    /// Fixed fallback used when the README is absent or yields nothing.
    pub fn fallback() -> Self {
        Self {
            greeting: "Hello! 👋".to_string(),
            intro: "Welcome to my GitHub profile! Here you will find projects that reflect \
                    a passion for technology and continuous learning."
                .to_string(),
            sections: vec![
                Section {
                    title: "About me".to_string(),
                    items: vec![SectionItem::Text(
                        "A technology enthusiast focused on learning and sharing knowledge, \
                         turning ideas into working software."
                            .to_string(),
                    )],
                },
                Section {
                    title: "What you will find here".to_string(),
                    items: vec![
                        SectionItem::Text("Repositories with practical solutions".to_string()),
                        SectionItem::Text("Open-source projects".to_string()),
                        SectionItem::Text("Examples of good engineering practice".to_string()),
                        SectionItem::Text("Collaborative experiments".to_string()),
                    ],
                },
            ],
        }
    }
}

/// Section titles dropped from the about content (stats widgets, contact
/// blocks). Lowercase keywords, matched by substring.
const SKIP_SECTIONS: &[&str] = &[
    "estatísticas do github",
    "github stats",
    "stats",
    "contato",
    "contact",
    "redes sociais",
    "social media",
];

/// Prose lines at or below this length are treated as noise.
const MIN_PROSE_LEN: usize = 10;

/// Parse README text into sections. Returns the fallback for `None` input
/// or when the parse yields nothing.
pub fn about_or_fallback(markdown: Option<&str>) -> AboutContent {
    match markdown {
        Some(markdown) => {
            let content = parse_about(markdown);
            if content.is_empty() {
                AboutContent::fallback()
            } else {
                content
            }
        }
        None => AboutContent::fallback(),
    }
}

/// Line-oriented segmentation: headings open sections, bullets and prose
/// fill them, rules are carried through, noise is skipped.
pub fn parse_about(markdown: &str) -> AboutContent {
    let mut content = AboutContent {
        greeting: String::new(),
        intro: String::new(),
        sections: Vec::new(),
    };
    let mut current: Option<Section> = None;
    let mut collecting = false;

    for raw_line in markdown.lines() {
        let line = raw_line.trim();

        if line.is_empty() || is_noise(line) {
            continue;
        }

        if is_rule(line) {
            if let Some(section) = current.as_mut() {
                section.items.push(SectionItem::Rule);
            }
            continue;
        }

        if let Some(title) = heading_title(line) {
            if let Some(section) = current.take() {
                content.sections.push(section);
            }
            if is_skipped_title(&title) {
                collecting = false;
                continue;
            }
            current = Some(Section {
                title,
                items: Vec::new(),
            });
            collecting = true;
        } else if let Some(text) = bullet_text(line) {
            if let Some(section) = current.as_mut() {
                section.items.push(SectionItem::Text(text.to_string()));
            }
        } else if collecting && !line.starts_with('#') && line.chars().count() > MIN_PROSE_LEN {
            if let Some(section) = current.as_mut() {
                section.items.push(SectionItem::Text(line.to_string()));
            }
        }
    }

    if let Some(section) = current.take() {
        content.sections.push(section);
    }

    content
}

fn is_noise(line: &str) -> bool {
    line.starts_with("![") || line.starts_with("http") || line.starts_with('<') || line.starts_with("```")
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| matches!(c, '-' | '='))
}

fn heading_title(line: &str) -> Option<String> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim().to_string())
    } else {
        None
    }
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn is_skipped_title(title: &str) -> bool {
    let lowered = title.to_lowercase();
    SKIP_SECTIONS.iter().any(|skip| lowered.contains(skip))
}
