// src/linkedin/skills.rs
const COMMON_SKILLS: &[&str] = &[
    "python", "javascript", "java", "react", "node.js", "sql", "aws",
    "machine learning", "ai", "data analysis", "project management",
    "agile", "scrum", "marketing", "sales", "design", "ui/ux",
    "html", "css", "typescript", "angular", "vue", "docker", "kubernetes",
    "git", "github", "jenkins", "jira", "confluence", "slack", "zoom",
    "excel", "powerpoint", "word", "photoshop", "illustrator", "figma",
    "tableau", "power bi", "r", "matlab", "tensorflow", "pytorch",
    "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn",
];

/// Dictionary skills mentioned in the headline, about text or job titles
pub fn infer_skills<'a>(
    headline: &str,
    about: &str,
    titles: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut texts = vec![headline.to_lowercase(), about.to_lowercase()];
    texts.extend(titles.into_iter().map(str::to_lowercase));

    COMMON_SKILLS
        .iter()
        .filter(|skill| texts.iter().any(|text| mentions(text, skill)))
        .map(|skill| skill.to_string())
        .collect()
}

// Skills of three letters or fewer only count as whole words
fn mentions(text: &str, skill: &str) -> bool {
    if skill.len() > 3 {
        return text.contains(skill);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == skill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_skills_across_sources_once() {
        let skills = infer_skills(
            "Python developer | AWS",
            "Loves python, React and Kubernetes",
            ["Senior Data Analysis Lead"],
        );
        assert_eq!(
            skills,
            vec!["python", "react", "aws", "data analysis", "kubernetes"]
        );
    }

    #[test]
    fn short_skills_need_word_boundaries() {
        assert!(infer_skills("Product manager", "", []).is_empty());
        assert_eq!(infer_skills("AI researcher using R", "", []), vec!["ai", "r"]);
        assert!(infer_skills("Digital marketing for awsome brands", "", [])
            .iter()
            .all(|s| s != "git" && s != "aws"));
        assert_eq!(infer_skills("SQL and Git daily", "", []), vec!["sql", "git"]);
    }
}
