// src/report/template_engine.rs
//! Markdown report template.
//!
//! The template only knows `{{name}}` placeholders. Anything conditional or
//! repeated (the executive summary, the LinkedIn table, the source list) is
//! rendered to a block string first and substituted like any other value.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::ReportContext;
use crate::agents::AiAnalysis;
use crate::data::{DataRow, DataTable};
use crate::types::RecordSource;

const SAMPLE_ROWS: usize = 8;
const SNIPPET_CHARS: usize = 220;

pub const REPORT_TEMPLATE: &str = "Generated on: {{generated_at}}

---

# Research Report

---

## 1. Query Context & Objective

- User Query: {{user_input}}
- Interpreted Objective: Provide a concise, factual answer supported by reputable sources and profile evidence where available.
- Timeframe: Current
- Intended Output Type: Analysis report

---

## 2. Executive Summary

{{executive_summary}}

---

{{linkedin_section}}## {{web_section_number}}. Core Data – Web Sources

| Title/URL | Snippet |
|-----------|---------|
{{web_rows}}

---

## 4. Sources

{{sources}}

---
Report generated by AI Agent System
";

/// Replace each `{{name}}` with its value in one pass; unknown names stay as written
pub fn process_variables(content: &str, variables: &HashMap<String, String>) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex")
    });
    re.replace_all(content, |caps: &Captures| {
        variables
            .get(&caps[1])
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

pub struct ReportView<'a> {
    pub generated_at: String,
    pub context: &'a ReportContext,
    pub analysis: &'a AiAnalysis,
    pub table: &'a DataTable,
}

impl<'a> ReportView<'a> {
    pub fn variables(&self) -> HashMap<String, String> {
        let sample: Vec<&DataRow> = self.table.rows().iter().take(SAMPLE_ROWS).collect();
        let has_linkedin = sample.iter().any(|r| r.source == RecordSource::LinkedIn);

        let user_input = if self.context.user_input.is_empty() {
            "N/A".to_string()
        } else {
            self.context.user_input.clone()
        };

        let mut vars = HashMap::new();
        vars.insert("generated_at".to_string(), self.generated_at.clone());
        vars.insert("user_input".to_string(), user_input);
        vars.insert("executive_summary".to_string(), self.executive_summary());
        vars.insert(
            "linkedin_section".to_string(),
            if has_linkedin {
                linkedin_section(&sample)
            } else {
                String::new()
            },
        );
        vars.insert(
            "web_section_number".to_string(),
            if has_linkedin { "3B" } else { "3" }.to_string(),
        );
        vars.insert("web_rows".to_string(), web_rows(&sample));
        vars.insert("sources".to_string(), bullet_list(&self.context.sources));
        vars
    }

    pub fn render(&self) -> String {
        process_variables(REPORT_TEMPLATE, &self.variables())
    }

    fn executive_summary(&self) -> String {
        if !self.context.answer.is_empty() {
            return self.context.answer.clone();
        }
        if self.analysis.key_insights.is_empty() {
            return "- No executive insights available.".to_string();
        }
        bullet_list(&self.analysis.key_insights)
    }
}

fn linkedin_section(sample: &[&DataRow]) -> String {
    let rows = sample
        .iter()
        .filter(|r| r.source == RecordSource::LinkedIn)
        .map(|r| {
            format!(
                "| {} | {} | {} | {} |",
                cell(&r.name),
                cell(&r.headline),
                cell(&r.location),
                r.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "## 3A. Core Data – LinkedIn Profiles\n\n\
         | Name | Headline | Location | Source |\n\
         |------|----------|----------|--------|\n\
         {}\n\n",
        rows
    )
}

fn web_rows(sample: &[&DataRow]) -> String {
    sample
        .iter()
        .filter(|r| r.source != RecordSource::LinkedIn)
        .map(|r| {
            let title = if r.name.is_empty() { &r.profile_url } else { &r.name };
            let snippet: String = r.summary.chars().take(SNIPPET_CHARS).collect();
            format!("| {} | {} |", cell(title), cell_or_empty(&snippet))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- N/A".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table cell text, `N/A` when blank
fn cell(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        cell_or_empty(value)
    }
}

fn cell_or_empty(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace('\n', " ")
        .replace('\r', " ")
        .trim()
        .to_string()
}
