// src/agents/requirements.rs
//! Structured reading of a free-text request: search terms, target sites,
//! report format and result limits.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const MAX_RESULTS_CAP: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTerm {
    pub kind: TermKind,
    pub value: String,
    pub priority: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Role,
    Skill,
    Location,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetWebsite {
    pub name: String,
    pub url: String,
    pub priority: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Markdown,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportFormat {
    pub format_type: ReportKind,
    pub include_charts: bool,
    pub include_summary: bool,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            format_type: ReportKind::Markdown,
            include_charts: true,
            include_summary: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRequest {
    pub search_terms: Vec<SearchTerm>,
    pub target_websites: Vec<TargetWebsite>,
    pub report_format: ReportFormat,
    pub max_results: usize,
    /// True only when the request named an explicit count
    pub max_results_explicit: bool,
    pub include_contact_info: bool,
}

const JOB_ROLES: &[&str] = &[
    "software engineer", "data scientist", "product manager", "designer",
    "marketing manager", "sales representative", "analyst", "developer",
    "architect", "consultant", "manager", "director", "vp", "ceo",
];

const SKILLS: &[&str] = &[
    "python", "javascript", "java", "react", "node.js", "sql", "aws",
    "machine learning", "ai", "data analysis", "project management",
    "agile", "scrum", "marketing", "sales", "design", "ui/ux",
];

const LOCATIONS: &[&str] = &[
    "san francisco", "new york", "london", "seattle", "austin", "boston",
    "chicago", "los angeles", "remote", "hybrid", "onsite",
];

const CONTACT_INDICATORS: &[&str] = &[
    "contact", "email", "phone", "reach out", "connect",
    "contact information", "contact details",
];

pub fn analyze(input: &str) -> ParsedRequest {
    let lower = input.to_lowercase();
    let (max_results, max_results_explicit) = match extract_max_results(&lower) {
        Some(n) => (n, true),
        None => (DEFAULT_MAX_RESULTS, false),
    };

    ParsedRequest {
        search_terms: extract_search_terms(input, &lower),
        target_websites: target_websites(&lower),
        report_format: report_format(&lower),
        max_results,
        max_results_explicit,
        include_contact_info: CONTACT_INDICATORS.iter().any(|w| lower.contains(w)),
    }
}

fn extract_search_terms(input: &str, lower: &str) -> Vec<SearchTerm> {
    let mut terms = Vec::new();
    let mut push = |dictionary: &[&str], kind: TermKind, priority: u8| {
        for word in dictionary.iter().filter(|w| lower.contains(*w)) {
            terms.push(SearchTerm {
                kind,
                value: word.to_string(),
                priority,
            });
        }
    };

    push(JOB_ROLES, TermKind::Role, 3);
    push(SKILLS, TermKind::Skill, 2);
    push(LOCATIONS, TermKind::Location, 4);

    if terms.is_empty() {
        terms.push(SearchTerm {
            kind: TermKind::General,
            value: input.to_string(),
            priority: 1,
        });
    }
    terms
}

fn target_websites(lower: &str) -> Vec<TargetWebsite> {
    let mut sites = vec![TargetWebsite {
        name: "LinkedIn".to_string(),
        url: "https://www.linkedin.com".to_string(),
        priority: 1,
    }];

    if ["indeed", "job board"].iter().any(|w| lower.contains(w)) {
        sites.push(TargetWebsite {
            name: "Indeed".to_string(),
            url: "https://www.indeed.com".to_string(),
            priority: 2,
        });
    }
    if ["glassdoor", "reviews"].iter().any(|w| lower.contains(w)) {
        sites.push(TargetWebsite {
            name: "Glassdoor".to_string(),
            url: "https://www.glassdoor.com".to_string(),
            priority: 3,
        });
    }
    sites
}

fn report_format(lower: &str) -> ReportFormat {
    let format_type = if lower.contains("json") {
        ReportKind::Json
    } else if lower.contains("csv") {
        ReportKind::Csv
    } else {
        ReportKind::Markdown
    };

    ReportFormat {
        format_type,
        include_charts: !(lower.contains("no charts") || lower.contains("without charts")),
        include_summary: !(lower.contains("no summary") || lower.contains("without summary")),
    }
}

fn extract_max_results(lower: &str) -> Option<usize> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"(\d+)\s*(?:results?|profiles?|people)",
            r"find\s+(\d+)\s*",
            r"get\s+(\d+)\s*",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid max results regex"))
        .collect()
    });

    patterns.iter().find_map(|re| {
        re.captures(lower)
            // Digit runs too long for usize are still a request for "many"
            .map(|caps| caps[1].parse::<usize>().unwrap_or(MAX_RESULTS_CAP))
            .map(|n| n.min(MAX_RESULTS_CAP))
    })
}
