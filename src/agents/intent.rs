// src/agents/intent.rs
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    LinkedinSearch,
    WebOnly,
    WebSearch,
    DataScraping,
}

const LINKEDIN_KEYWORDS: &[&str] = &["linkedin", "profile", "professional profile", "resume", "cv"];

const FACT_KEYWORDS: &[&str] = &[
    "average", "avg", "salary", "salaries", "what is", "who is", "define", "definition",
    "statistics", "stats", "market size", "trend", "trends", "overview", "comparison", "vs",
    "benefits", "cons", "pros", "how much", "how many", "price", "cost",
];

const SCRAPING_KEYWORDS: &[&str] = &["scrape", "extract", "data from", "crawl"];

const SEARCH_KEYWORDS: &[&str] = &["search", "find", "look for"];

/// Keyword classifier; the first matching rule wins
pub fn classify(input: &str) -> TaskKind {
    let lower = input.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if any(LINKEDIN_KEYWORDS) {
        TaskKind::LinkedinSearch
    } else if any(FACT_KEYWORDS) {
        TaskKind::WebOnly
    } else if any(SCRAPING_KEYWORDS) {
        TaskKind::DataScraping
    } else if any(SEARCH_KEYWORDS) {
        TaskKind::WebSearch
    } else {
        TaskKind::WebOnly
    }
}

/// Every `http(s)://` run in the request text
pub fn extract_urls(input: &str) -> Vec<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    let re = URL.get_or_init(|| Regex::new(r"https?://\S+").expect("valid url regex"));
    re.find_iter(input).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkedin_words_take_precedence() {
        assert_eq!(
            classify("Find LinkedIn profiles of data scientists"),
            TaskKind::LinkedinSearch
        );
        // "salary" is a fact keyword but "cv" wins first
        assert_eq!(classify("cv tips and salary"), TaskKind::LinkedinSearch);
    }

    #[test]
    fn fact_questions_are_web_only() {
        assert_eq!(
            classify("What is the average salary of a nurse?"),
            TaskKind::WebOnly
        );
        assert_eq!(classify("rust vs go"), TaskKind::WebOnly);
    }

    #[test]
    fn scraping_then_search_then_default() {
        assert_eq!(classify("crawl https://example.com"), TaskKind::DataScraping);
        assert_eq!(classify("search for rust meetups"), TaskKind::WebSearch);
        assert_eq!(classify("rust meetups berlin"), TaskKind::WebOnly);
    }

    #[test]
    fn urls_are_extracted_verbatim() {
        let urls = extract_urls("scrape https://a.com/x and http://b.org, please");
        assert_eq!(urls, vec!["https://a.com/x", "http://b.org,"]);
    }
}
