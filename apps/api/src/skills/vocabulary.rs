//! Skill Vocabulary — the fixed list of technical terms the extractor recognises.
//!
//! Built once at startup and shared read-only through `AppState`. Every entry carries
//! its own boundary-anchored pattern so the dictionary matcher never recompiles.

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

/// Built-in technical skills, grouped by category. Lowercase only.
///
/// The list repeats a few entries across categories (`mongodb`, `express`, `react`);
/// `SkillVocabulary::new` collapses them.
pub const TECH_SKILLS: &[&str] = &[
    // Programming languages
    "javascript",
    "python",
    "java",
    "c++",
    "c#",
    "ruby",
    "php",
    "swift",
    "go",
    "rust",
    "typescript",
    "kotlin",
    "scala",
    "perl",
    "r",
    "matlab",
    "dart",
    "groovy",
    "bash",
    // Web technologies
    "html",
    "css",
    "sass",
    "less",
    "bootstrap",
    "tailwind",
    "jquery",
    "ajax",
    "xml",
    // Frameworks & libraries
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "laravel",
    "asp.net",
    "rails",
    "symfony",
    "flutter",
    "react native",
    // Databases
    "sql",
    "mongodb",
    "mysql",
    "postgresql",
    "oracle",
    "sqlite",
    "firebase",
    "dynamodb",
    "cassandra",
    "redis",
    "couchdb",
    "mariadb",
    "neo4j",
    // Cloud & DevOps
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "terraform",
    "ansible",
    "git",
    "github",
    "gitlab",
    "bitbucket",
    "ci/cd",
    "prometheus",
    "grafana",
    // AI & data science
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "tensorflow",
    "pytorch",
    "keras",
    "scikit-learn",
    "pandas",
    "numpy",
    "hadoop",
    "spark",
    // MERN
    "mern",
    "mongodb",
    "express",
    "react",
    "node",
];

/// A single vocabulary entry with its compiled whole-word pattern.
#[derive(Debug, Clone)]
pub struct Skill {
    pub name: String,
    pattern: Regex,
}

impl Skill {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim().to_lowercase();
        let pattern = Regex::new(&boundary_pattern(&name))
            .with_context(|| format!("Invalid skill pattern for '{name}'"))?;
        Ok(Skill { name, pattern })
    }

    /// True if the skill occurs in `text` delimited by non-word characters or text edges.
    pub fn occurs_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Builds `(?:^|\W)<escaped>(?:\W|$)`, with inner spaces relaxed to `\s+`.
///
/// `\b` is not usable here: for entries ending in a symbol (`c++`, `c#`) it would
/// demand a word character right after the symbol.
fn boundary_pattern(name: &str) -> String {
    let body = name
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    format!(r"(?:^|\W){body}(?:\W|$)")
}

/// The immutable, deduplicated skill vocabulary.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: Vec<Skill>,
    names: HashSet<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from raw entries. Blank entries are skipped; repeats keep
    /// the position of their first occurrence.
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut skills = Vec::new();
        let mut names = HashSet::new();

        for entry in entries {
            if entry.trim().is_empty() {
                continue;
            }
            let skill = Skill::new(entry)?;
            if names.insert(skill.name.clone()) {
                skills.push(skill);
            }
        }

        Ok(SkillVocabulary { skills, names })
    }

    /// The built-in technical skills list.
    pub fn builtin() -> Result<Self> {
        Self::new(TECH_SKILLS.iter().copied())
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Exact membership test against a lowercase term.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.names.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }
}
