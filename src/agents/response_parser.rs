// src/agents/response_parser.rs
//! Heuristic parsing of free-text LLM replies.
//!
//! Search replies follow a loose `Answer:` / `Sources:` / `LinkedIn Profiles`
//! layout with an optional `RESULTS_JSON` block; analysis replies are either
//! JSON or markdown bullet sections.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSections {
    pub answer: String,
    pub sources: Vec<String>,
    pub linkedin_profiles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AiAnalysis {
    pub fn canned(insight: &str) -> Self {
        Self {
            key_insights: vec![insight.to_string()],
            trends: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Answer,
    Sources,
    Linkedin,
}

/// Split a search reply into its answer, source URLs and LinkedIn URLs
pub fn parse_sections(content: &str) -> SearchSections {
    let mut sections = SearchSections::default();
    let mut current: Option<Section> = None;
    let mut buffer: Vec<String> = Vec::new();

    for raw in content.lines() {
        let line = raw.trim();
        let header = strip_emphasis(line);
        let lower = header.to_lowercase();

        if lower.starts_with("answer:") {
            if current == Some(Section::Answer) {
                sections.answer = buffer.join("\n").trim().to_string();
            }
            buffer = vec![strip_emphasis(&header["answer:".len()..]).to_string()];
            current = Some(Section::Answer);
        } else if lower.starts_with("sources:") || lower.starts_with("linkedin profiles") {
            if current == Some(Section::Answer) {
                sections.answer = buffer.join("\n").trim().to_string();
            }
            buffer.clear();
            current = Some(if lower.starts_with("sources:") {
                Section::Sources
            } else {
                Section::Linkedin
            });
        } else {
            match current {
                Some(Section::Answer) => buffer.push(line.to_string()),
                Some(section) if line.starts_with('-') || line.starts_with('•') => {
                    let entry = line
                        .trim_start_matches(|c| c == '-' || c == '•' || c == '*' || c == ' ')
                        .trim()
                        .to_string();
                    if section == Section::Sources {
                        sections.sources.push(entry);
                    } else {
                        sections.linkedin_profiles.push(entry);
                    }
                }
                _ => {}
            }
        }
    }

    if current == Some(Section::Answer) && sections.answer.is_empty() {
        sections.answer = buffer.join("\n").trim().to_string();
    }

    sections.sources = clean_urls(sections.sources);
    sections.linkedin_profiles = clean_urls(sections.linkedin_profiles);
    sections
}

fn strip_emphasis(line: &str) -> &str {
    line.trim_start_matches(|c| c == '*' || c == '#')
        .trim_start()
        .trim_end_matches('*')
}

fn clean_urls(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|u| u.starts_with("http"))
        .map(|u| u.split(' ').next().unwrap_or_default().to_string())
        .collect()
}

/// Items of the machine-readable `RESULTS_JSON` block, if one parses
pub fn extract_results_json(content: &str) -> Vec<ResultItem> {
    static LABELLED: OnceLock<Regex> = OnceLock::new();
    static BARE: OnceLock<Regex> = OnceLock::new();
    let labelled = LABELLED.get_or_init(|| {
        Regex::new(r"(?i)RESULTS_JSON\s*\n\s*\{[\s\S]*?\}\s*$").expect("valid labelled regex")
    });
    let bare = BARE.get_or_init(|| {
        Regex::new(r#"(?i)\{\s*"results"\s*:\s*\[.[\s\S]*?\]\s*\}"#).expect("valid bare regex")
    });

    let Some(block) = labelled.find(content).or_else(|| bare.find(content)) else {
        return Vec::new();
    };
    let block = block.as_str();
    let Some(start) = block.find('{') else {
        return Vec::new();
    };

    #[derive(Deserialize)]
    struct Envelope {
        results: Vec<ResultItem>,
    }

    serde_json::from_str::<Envelope>(block[start..].trim())
        .map(|envelope| envelope.results)
        .unwrap_or_default()
}

/// Unique http(s) links in order of appearance, at most `max_n`
pub fn extract_urls(text: &str, max_n: usize) -> Vec<String> {
    static LINK: OnceLock<Regex> = OnceLock::new();
    let re = LINK.get_or_init(|| {
        Regex::new(r#"https?://[^\s\)\]"'\}>]+"#).expect("valid link regex")
    });

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for m in re.find_iter(text) {
        if unique.len() >= max_n {
            break;
        }
        if seen.insert(m.as_str()) {
            unique.push(m.as_str().to_string());
        }
    }
    unique
}

/// Read an analysis reply as JSON, falling back to bullet sections
pub fn parse_analysis(content: &str) -> AiAnalysis {
    if let Some(analysis) = parse_analysis_json(content) {
        return analysis;
    }
    parse_analysis_bullets(content)
}

fn parse_analysis_json(content: &str) -> Option<AiAnalysis> {
    if let Ok(analysis) = serde_json::from_str::<AiAnalysis>(content.trim()) {
        return Some(analysis);
    }
    // Replies often wrap the object in a fenced block
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<AiAnalysis>(&content[start..=end]).ok()
}

fn parse_analysis_bullets(content: &str) -> AiAnalysis {
    #[derive(Clone, Copy)]
    enum Bucket {
        Insights,
        Trends,
        Recommendations,
    }

    let mut insights = Vec::new();
    let mut trends = Vec::new();
    let mut recommendations = Vec::new();
    let mut current: Option<Bucket> = None;

    for raw in content.lines() {
        let line = raw.trim();
        let is_bullet = (line.starts_with('-') || line.starts_with('•') || line.starts_with('*'))
            && !line.starts_with("**");

        if is_bullet {
            let item = line
                .char_indices()
                .nth(1)
                .map(|(i, _)| line[i..].trim().to_string())
                .unwrap_or_default();
            if item.is_empty() {
                continue;
            }
            match current {
                Some(Bucket::Insights) => insights.push(item),
                Some(Bucket::Trends) => trends.push(item),
                Some(Bucket::Recommendations) => recommendations.push(item),
                None => {}
            }
            continue;
        }

        let lower = line.to_lowercase();
        if lower.contains("insight") || lower.contains("key") {
            current = Some(Bucket::Insights);
        } else if lower.contains("trend") {
            current = Some(Bucket::Trends);
        } else if lower.contains("recommendation") || lower.contains("suggestion") {
            current = Some(Bucket::Recommendations);
        }
    }

    AiAnalysis {
        key_insights: take_or(insights, 3, "Data analysis completed"),
        trends: take_or(trends, 2, "No specific trends identified"),
        recommendations: take_or(recommendations, 2, "Consider expanding your search criteria"),
    }
}

fn take_or(items: Vec<String>, n: usize, default: &str) -> Vec<String> {
    if items.is_empty() {
        vec![default.to_string()]
    } else {
        items.into_iter().take(n).collect()
    }
}
