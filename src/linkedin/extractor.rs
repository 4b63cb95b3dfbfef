// src/linkedin/extractor.rs
//! Selector cascades over profile page snapshots.
//!
//! LinkedIn ships obfuscated, frequently changing markup, so every field is
//! looked up through an ordered list of selectors; the first element whose
//! text passes the field's guard wins. Selectors the parser rejects are
//! skipped rather than treated as errors.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::types::{ActivityPost, BasicInfo, Recommendation};
use crate::types::{EducationEntry, ExperienceEntry};

const MAIN_PATH: &str = "#profile-content > div > div.scaffold-layout.scaffold-layout--breakpoint-none.scaffold-layout--main-aside.scaffold-layout--single-column.scaffold-layout--reflow.pv-profile.pvs-loader-wrapper__shimmer--animate > div > div > main";
const SECTION_BODY: &str = "div.jEmyvosBamZBqtuVXgQXYBaKSHXgyPFHMUShdfc";
const ENTITY_CONTENT: &str = "div > div.display-flex.flex-column.align-self-center.flex-grow-1";

const DETAIL_ITEMS: &str =
    "ul.pvs-list__paged-list-items > li, li.pvs-list__item--line-separated, .pvs-entity";

const MAX_EXPERIENCE: usize = 5;
const MAX_EDUCATION: usize = 3;
const MAX_POSTS: usize = 4;
const MAX_RECOMMENDATIONS: usize = 5;

const NAME_SELECTORS: &[&str] = &[
    "h1.text-heading-xlarge",
    ".text-heading-xlarge",
    "h1",
    ".pv-text-details__left-panel h1",
];

const HEADLINE_SELECTORS: &[&str] = &[
    ".text-body-medium.break-words",
    ".pv-text-details__left-panel .text-body-medium",
    ".pv-text-details__left-panel .text-body-medium.break-words",
];

const LOCATION_SELECTORS: &[&str] = &[
    ".text-body-small.inline.t-black--light.break-words",
    ".pv-text-details__left-panel .text-body-small",
    ".pv-text-details__left-panel .text-body-small.inline.t-black--light.break-words",
];

const IMAGE_SELECTORS: &[&str] = &[
    ".pv-top-card-profile-picture__image",
    ".profile-picture img",
    "img[alt*=\"profile\"]",
    ".pv-top-card__photo img",
];

const ABOUT_SECTION_SELECTORS: &[&str] = &[
    "section[data-section=\"about\"]",
    "[data-view-name=\"profile-about\"]",
    "section:has([data-field=\"about\"])",
    "section.artdeco-card:nth-child(2)",
    "#profile-content main section:nth-child(2)",
    ".pv-about-section",
    ".about-section",
];

const ABOUT_TEXT_SELECTORS: &[&str] = &[
    ".inline-show-more-text__text",
    ".pv-shared-text-with-see-more",
    ".pv-about__summary-text",
    "span[aria-hidden=\"true\"]",
    "div > span",
    "p",
];

const ABOUT_NAV_TERMS: &[&str] = &[
    "experience", "education", "skills", "activity", "see more", "show all",
];

const ABOUT_FALLBACK_SELECTORS: &[&str] = &[
    "[data-generated-suggestion-target] .inline-show-more-text__text",
    ".pv-shared-text-with-see-more .inline-show-more-text__text",
    ".pv-about__summary-text .inline-show-more-text__text",
    "[data-view-name=\"profile-about\"] .inline-show-more-text__text",
    ".pv-about-section .inline-show-more-text__text",
    "section[data-section=\"about\"] .inline-show-more-text__text",
    ".about-section .inline-show-more-text__text",
    ".pv-shared-text-with-see-more",
    ".inline-show-more-text",
    "[data-view-name=\"profile-about\"] span[aria-hidden=\"true\"]",
    ".pv-about__summary-text",
    ".pv-about__summary-text .inline-show-more-text",
];

const EXACT_TITLE: &str = ".t-bold span[aria-hidden=\"true\"], h3, .t-bold";
const EXACT_SUBTITLE: &str = ".t-normal span[aria-hidden=\"true\"], h4, .t-normal";
const EXACT_DURATION: &str = ".t-black--light span[aria-hidden=\"true\"], .t-black--light";

const EXPERIENCE_TITLE_SELECTORS: &[&str] = &[
    ".t-bold span[aria-hidden=\"true\"]",
    ".pvs-entity__caption-wrapper .t-bold span",
    "[data-field=\"experience_company_logo\"] + div .t-bold span",
    ".pv-entity__summary-info .t-bold span",
    ".experience-item__title span",
    ".t-16 .t-bold span[aria-hidden=\"true\"]",
];

const EXPERIENCE_COMPANY_SELECTORS: &[&str] = &[
    ".t-normal span[aria-hidden=\"true\"]",
    ".pvs-entity__caption-wrapper .t-normal span",
    ".pv-entity__secondary-title span",
    ".experience-item__company span",
    ".t-14 .t-normal span[aria-hidden=\"true\"]",
];

const EXPERIENCE_DURATION_SELECTORS: &[&str] = &[
    ".t-black--light span[aria-hidden=\"true\"]",
    ".pvs-entity__caption-wrapper .t-black--light span",
    ".pv-entity__dates span",
    ".experience-item__duration span",
    ".t-12 .t-black--light span[aria-hidden=\"true\"]",
];

const SCHOOL_SELECTORS: &[&str] = &[
    ".t-bold span[aria-hidden=\"true\"]",
    ".pvs-entity__caption-wrapper .t-bold span",
    "[data-field=\"education_school_logo\"] + div .t-bold span",
    ".pv-entity__summary-info .t-bold span",
    ".education-item__school span",
    ".t-16 .t-bold span[aria-hidden=\"true\"]",
];

const DEGREE_SELECTORS: &[&str] = &[
    ".t-normal span[aria-hidden=\"true\"]",
    ".pvs-entity__caption-wrapper .t-normal span",
    ".pv-entity__secondary-title span",
    ".education-item__degree span",
    ".t-14 .t-normal span[aria-hidden=\"true\"]",
];

const EDUCATION_DURATION_SELECTORS: &[&str] = &[
    ".t-black--light span[aria-hidden=\"true\"]",
    ".pvs-entity__caption-wrapper .t-black--light span",
    ".pv-entity__dates span",
    ".education-item__duration span",
    ".t-12 .t-black--light span[aria-hidden=\"true\"]",
];

const EDUCATION_WORDS: &[&str] = &["university", "college", "bachelor", "master", "phd", "degree"];

const LIST_NOISE: &[&str] = &[
    "top skills", "skills", "skill", "endorsement", "endorsed", "show more",
    "see all", "view more", "expand", "collapse", "programming language",
    "activity", "posts", "likes", "comments", "shares", "reactions",
];

const EXPERIENCE_ONLY_NOISE: &[&str] = &["connections", "followers", "following", "about"];

const POST_SELECTOR: &str = "#ember735 > div > div > div.fie-impression-container > div.gBZADplBUhjJEuwClhfklXoBpUswoQqQzDCykjU > div > div > span > span";

const POST_FALLBACK_SELECTORS: &[&str] = &[
    "article.update-components-update",
    "div.recent-activity-update",
    "div.feed-shared-update-v2",
    "div.occludable-update",
];

const POST_TEXT: &str = ".feed-shared-text, .update-components-text, .break-words, span[dir=\"ltr\"]";
const POST_DATE: &str =
    ".feed-shared-actor__sub-description, .update-components-actor__sub-description, time";

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(_) => {
            debug!("Skipping unsupported selector: {}", css);
            None
        }
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn first_match<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    selector(css).and_then(|sel| scope.select(&sel).next())
}

fn all_matches<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    selector(css)
        .map(|sel| scope.select(&sel).collect())
        .unwrap_or_default()
}

/// First selector whose first match has non-empty text passing `accept`
fn text_by_selectors<F>(scope: ElementRef, selectors: &[&str], accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    selectors.iter().find_map(|css| {
        let text = text_of(first_match(scope, css)?);
        (!text.is_empty() && accept(&text)).then_some(text)
    })
}

fn text_longer_than(scope: ElementRef, selectors: &[&str], min: usize) -> Option<String> {
    text_by_selectors(scope, selectors, |t| char_len(t) > min)
}

fn non_empty_text(scope: ElementRef, css: &str) -> Option<String> {
    first_match(scope, css)
        .map(text_of)
        .filter(|t| !t.is_empty())
}

pub fn basic_info(doc: &Html) -> BasicInfo {
    let root = doc.root_element();

    let profile_image = IMAGE_SELECTORS.iter().find_map(|css| {
        let src = first_match(root, css)?.value().attr("src")?;
        src.starts_with("http").then(|| src.to_string())
    });

    let info = BasicInfo {
        name: text_longer_than(root, NAME_SELECTORS, 1).unwrap_or_default(),
        headline: text_longer_than(root, HEADLINE_SELECTORS, 5).unwrap_or_default(),
        location: text_longer_than(root, LOCATION_SELECTORS, 2).unwrap_or_default(),
        profile_image,
    };
    debug!(
        "Basic info: name={:?} headline={:?} location={:?}",
        info.name, info.headline, info.location
    );
    info
}

pub fn about(doc: &Html) -> String {
    let root = doc.root_element();
    let exact = format!("{MAIN_PATH} > section:nth-child(2) > div.display-flex.ph5.pv3 > div");
    let section_selectors =
        std::iter::once(exact.as_str()).chain(ABOUT_SECTION_SELECTORS.iter().copied());

    for css in section_selectors {
        let Some(section) = first_match(root, css) else {
            continue;
        };

        let inner = text_by_selectors(section, ABOUT_TEXT_SELECTORS, |t| {
            let head: String = t.to_lowercase().chars().take(10).collect();
            char_len(t) > 20 && !head.contains("about")
        });
        if let Some(text) = inner {
            info!("Found about section: {} characters", char_len(&text));
            return text;
        }

        let whole = text_of(section);
        let len = char_len(&whole);
        if len > 20 && len < 2000 {
            let lower = whole.to_lowercase();
            if !ABOUT_NAV_TERMS.iter().any(|term| lower.contains(term)) {
                info!("Found about section: {} characters", len);
                return whole;
            }
        }
    }

    match text_longer_than(root, ABOUT_FALLBACK_SELECTORS, 20) {
        Some(text) => {
            info!("Found about section: {} characters", char_len(&text));
            text
        }
        None => {
            info!("No about section found");
            String::new()
        }
    }
}

/// Experience from the main profile's own section, title and company required
pub fn experience_exact(doc: &Html) -> Vec<ExperienceEntry> {
    let css = format!("{MAIN_PATH} > section:nth-child(3) > {SECTION_BODY}");
    let Some(section) = first_match(doc.root_element(), &css) else {
        return Vec::new();
    };

    let entries: Vec<ExperienceEntry> = all_matches(section, "ul > li")
        .into_iter()
        .take(MAX_EXPERIENCE)
        .filter_map(|item| {
            let target = first_match(item, ENTITY_CONTENT).unwrap_or(item);
            let entry = ExperienceEntry {
                title: non_empty_text(target, EXACT_TITLE),
                company: non_empty_text(target, EXACT_SUBTITLE),
                duration: non_empty_text(target, EXACT_DURATION),
            };
            (entry.title.is_some() && entry.company.is_some()).then_some(entry)
        })
        .collect();

    if !entries.is_empty() {
        info!("Extracted {} experience entries (exact selectors)", entries.len());
    }
    entries
}

/// Experience from the `details/experience/` page
pub fn experience_details(doc: &Html) -> Vec<ExperienceEntry> {
    let items = all_matches(doc.root_element(), DETAIL_ITEMS);
    info!("Found {} experience items", items.len());

    let not_education = |t: &str| {
        let lower = t.to_lowercase();
        char_len(t) > 2 && !EDUCATION_WORDS.iter().any(|w| lower.contains(w))
    };

    let mut experience = Vec::new();
    for item in items.into_iter().take(MAX_EXPERIENCE) {
        let title = text_by_selectors(item, EXPERIENCE_TITLE_SELECTORS, not_education);
        let company = text_by_selectors(item, EXPERIENCE_COMPANY_SELECTORS, not_education);
        let duration = text_longer_than(item, EXPERIENCE_DURATION_SELECTORS, 2);

        if title.is_none() {
            let nested = nested_roles(item);
            if !nested.is_empty() {
                experience.extend(nested);
                continue;
            }
        }

        let entry = ExperienceEntry {
            title,
            company,
            duration,
        };
        if is_plausible_experience(&entry) {
            experience.push(entry);
        }
    }

    experience.truncate(MAX_EXPERIENCE);
    info!("Extracted {} experience entries", experience.len());
    experience
}

// Several roles grouped under one company
fn nested_roles(item: ElementRef) -> Vec<ExperienceEntry> {
    all_matches(item, ".pvs-entity__sub-components li")
        .into_iter()
        .take(3)
        .filter_map(|role| {
            let title = first_match(role, ".t-bold span[aria-hidden=\"true\"]").map(text_of);
            let company = first_match(role, ".t-normal span[aria-hidden=\"true\"]").map(text_of);
            let duration = first_match(role, ".t-black--light span[aria-hidden=\"true\"]")
                .map(text_of)
                .filter(|d| !d.is_empty());
            match (title, company) {
                (Some(title), Some(company)) if !title.is_empty() && !company.is_empty() => {
                    Some(ExperienceEntry {
                        title: Some(title),
                        company: Some(company),
                        duration,
                    })
                }
                _ => None,
            }
        })
        .collect()
}

fn is_plausible_experience(entry: &ExperienceEntry) -> bool {
    let title = entry.title.as_deref().unwrap_or_default();
    let company = entry.company.as_deref().unwrap_or_default();
    if title.is_empty() && company.is_empty() {
        return false;
    }

    let title_lower = title.to_lowercase();
    let company_lower = company.to_lowercase();
    let noisy = LIST_NOISE
        .iter()
        .chain(EXPERIENCE_ONLY_NOISE)
        .any(|k| title_lower.contains(k) || company_lower.contains(k));
    let bullet = title.starts_with('•') || company.starts_with('•');
    let duplicate = !title.is_empty() && title == company;

    !(noisy || bullet || duplicate)
}

/// Education from the main profile's own section, school required
pub fn education_exact(doc: &Html) -> Vec<EducationEntry> {
    let root = doc.root_element();
    let base = format!("{MAIN_PATH} > section:nth-child(5) > {SECTION_BODY} > ul");

    let mut items: Vec<ElementRef> = (1..=2)
        .filter_map(|n| {
            first_match(root, &format!("{base} > li:nth-child({n}) > {ENTITY_CONTENT}"))
        })
        .collect();
    if items.is_empty() {
        items = all_matches(root, &format!("{base} > li > {ENTITY_CONTENT}"));
    }

    let entries: Vec<EducationEntry> = items
        .into_iter()
        .take(MAX_EDUCATION)
        .filter_map(|item| {
            let entry = EducationEntry {
                school: non_empty_text(item, EXACT_TITLE),
                degree: non_empty_text(item, EXACT_SUBTITLE),
                duration: non_empty_text(item, EXACT_DURATION),
            };
            entry.school.is_some().then_some(entry)
        })
        .collect();

    if !entries.is_empty() {
        info!("Extracted {} education entries (exact selectors)", entries.len());
    }
    entries
}

/// Education from the `details/education/` page
pub fn education_details(doc: &Html) -> Vec<EducationEntry> {
    let items = all_matches(doc.root_element(), DETAIL_ITEMS);
    info!("Found {} education items", items.len());

    let education: Vec<EducationEntry> = items
        .into_iter()
        .take(MAX_EDUCATION)
        .filter_map(|item| {
            let entry = EducationEntry {
                school: text_longer_than(item, SCHOOL_SELECTORS, 2),
                degree: text_longer_than(item, DEGREE_SELECTORS, 2),
                duration: text_longer_than(item, EDUCATION_DURATION_SELECTORS, 2),
            };
            is_plausible_education(&entry).then_some(entry)
        })
        .collect();

    info!("Extracted {} education entries", education.len());
    education
}

fn is_plausible_education(entry: &EducationEntry) -> bool {
    let school = entry.school.as_deref().unwrap_or_default();
    let degree = entry.degree.as_deref().unwrap_or_default();
    if school.is_empty() && degree.is_empty() {
        return false;
    }
    let combined = format!("{} {}", school, degree).to_lowercase();
    let noisy = LIST_NOISE.iter().any(|k| combined.contains(k));
    let bullet = school.starts_with('•') || degree.starts_with('•');
    !(noisy || bullet)
}

/// Posts from the `recent-activity/all/` page
pub fn activity_posts(doc: &Html) -> Vec<ActivityPost> {
    let root = doc.root_element();

    let primary = posts_from(all_matches(root, POST_SELECTOR));
    if !primary.is_empty() {
        info!("Extracted {} activity posts", primary.len());
        return primary;
    }

    for css in POST_FALLBACK_SELECTORS {
        let posts = posts_from(all_matches(root, css));
        if !posts.is_empty() {
            info!("Extracted {} activity posts with fallback selector: {}", posts.len(), css);
            return posts;
        }
    }
    info!("Extracted 0 activity posts");
    Vec::new()
}

fn posts_from(items: Vec<ElementRef>) -> Vec<ActivityPost> {
    items
        .into_iter()
        .take(MAX_POSTS)
        .filter_map(|item| {
            let post = ActivityPost {
                text: first_match(item, POST_TEXT)
                    .map(text_of)
                    .filter(|t| char_len(t) > 10),
                date: first_match(item, POST_DATE)
                    .map(text_of)
                    .filter(|d| char_len(d) > 2),
            };
            (post.text.is_some() || post.date.is_some()).then_some(post)
        })
        .collect()
}

/// Recommendations from the `details/recommendations/` page
pub fn recommendations(doc: &Html) -> Vec<Recommendation> {
    let items = all_matches(doc.root_element(), ".pvs-list__paged-list-items > li");
    info!("Found {} recommendation items", items.len());

    items
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .filter_map(|item| {
            let rec = Recommendation {
                recommender_name: first_match(item, ".t-bold span[aria-hidden=\"true\"]")
                    .map(text_of)
                    .filter(|t| char_len(t) > 2),
                recommender_title: first_match(item, ".t-normal span[aria-hidden=\"true\"]")
                    .map(text_of)
                    .filter(|t| char_len(t) > 2),
                recommendation_text: first_match(
                    item,
                    ".pv-shared-text-with-see-more span[aria-hidden=\"true\"]",
                )
                .map(text_of)
                .filter(|t| char_len(t) > 10),
            };
            let fields = [
                rec.recommender_name.is_some(),
                rec.recommender_title.is_some(),
                rec.recommendation_text.is_some(),
            ]
            .iter()
            .filter(|present| **present)
            .count();
            (fields >= 2).then_some(rec)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP_CARD: &str = r#"
        <html><body>
          <div class="pv-text-details__left-panel">
            <h1 class="text-heading-xlarge">Jane Doe</h1>
            <div class="text-body-medium break-words">Staff Engineer at Acme</div>
            <span class="text-body-small inline t-black--light break-words">Berlin, Germany</span>
          </div>
          <img class="pv-top-card-profile-picture__image" src="https://media.example/jane.jpg">
          <section data-section="about">
            <span aria-hidden="true">About</span>
            <div class="inline-show-more-text__text">I build distributed systems and mentor engineers.</div>
          </section>
        </body></html>"#;

    #[test]
    fn basic_info_uses_first_passing_selector() {
        let doc = Html::parse_document(TOP_CARD);
        let info = basic_info(&doc);
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.headline, "Staff Engineer at Acme");
        assert_eq!(info.location, "Berlin, Germany");
        assert_eq!(info.profile_image.as_deref(), Some("https://media.example/jane.jpg"));
    }

    #[test]
    fn short_headline_is_rejected() {
        let doc = Html::parse_document(
            r#"<div class="text-body-medium break-words">CTO</div><h1>X</h1>"#,
        );
        let info = basic_info(&doc);
        assert!(info.headline.is_empty());
        assert!(info.name.is_empty());
    }

    #[test]
    fn about_prefers_inner_text() {
        let doc = Html::parse_document(TOP_CARD);
        assert_eq!(
            about(&doc),
            "I build distributed systems and mentor engineers."
        );
    }

    #[test]
    fn about_whole_section_skips_navigation_text() {
        let doc = Html::parse_document(
            r#"<section class="pv-about-section">Show all experience and education here</section>
               <div class="pv-shared-text-with-see-more">Fallback summary that is long enough.</div>"#,
        );
        assert_eq!(about(&doc), "Fallback summary that is long enough.");
    }

    #[test]
    fn about_is_empty_when_nothing_matches() {
        let doc = Html::parse_document("<p>short</p>");
        assert!(about(&doc).is_empty());
    }

    const EXPERIENCE_PAGE: &str = r#"
        <ul class="pvs-list__paged-list-items">
          <li>
            <div class="t-bold"><span aria-hidden="true">Senior Engineer</span></div>
            <div class="t-normal"><span aria-hidden="true">Acme Corp</span></div>
            <div class="t-black--light"><span aria-hidden="true">2020 - Present</span></div>
          </li>
          <li>
            <div class="pvs-entity__sub-components"><ul>
              <li>
                <div class="t-bold"><span aria-hidden="true">Master Brewer</span></div>
                <div class="t-normal"><span aria-hidden="true">Globex</span></div>
              </li>
              <li>
                <div class="t-bold"><span aria-hidden="true">Developer</span></div>
                <div class="t-normal"><span aria-hidden="true">Globex Labs</span></div>
                <div class="t-black--light"><span aria-hidden="true">2016 - 2018</span></div>
              </li>
            </ul></div>
          </li>
          <li>
            <div class="t-bold"><span aria-hidden="true">Top skills</span></div>
            <div class="t-normal"><span aria-hidden="true">Rust, Go</span></div>
          </li>
          <li>
            <div class="t-bold"><span aria-hidden="true">Stanford University</span></div>
            <div class="t-normal"><span aria-hidden="true">Stanford University</span></div>
          </li>
        </ul>"#;

    #[test]
    fn experience_details_handles_groups_and_noise() {
        let doc = Html::parse_document(EXPERIENCE_PAGE);
        let experience = experience_details(&doc);

        let titles: Vec<_> = experience.iter().map(|e| e.title.as_deref()).collect();
        // the grouped item's first title reads like a degree, so its roles are used
        assert_eq!(
            titles,
            vec![Some("Senior Engineer"), Some("Master Brewer"), Some("Developer")]
        );
        assert_eq!(experience[0].duration.as_deref(), Some("2020 - Present"));
        assert_eq!(experience[1].duration, None);
        assert_eq!(experience[2].company.as_deref(), Some("Globex Labs"));
        assert_eq!(experience[2].duration.as_deref(), Some("2016 - 2018"));
    }

    #[test]
    fn exact_experience_requires_title_and_company() {
        let html = r#"<div id="profile-content"><div><div class="scaffold-layout scaffold-layout--breakpoint-none scaffold-layout--main-aside scaffold-layout--single-column scaffold-layout--reflow pv-profile pvs-loader-wrapper__shimmer--animate"><div><div><main>
                 <section>about</section>
                 <section>skip</section>
                 <section><div class="jEmyvosBamZBqtuVXgQXYBaKSHXgyPFHMUShdfc"><ul>
                   <li><div><div class="display-flex flex-column align-self-center flex-grow-1">
                     <h3>Engineer</h3><h4>Initech</h4><span class="t-black--light">2019</span>
                   </div></div></li>
                   <li><div><div class="display-flex flex-column align-self-center flex-grow-1">
                     <h3>Orphan title</h3>
                   </div></div></li>
                 </ul></div></section>
               </main></div></div></div></div></div>"#;
        let doc = Html::parse_document(html);
        let experience = experience_exact(&doc);
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].company.as_deref(), Some("Initech"));
        assert_eq!(experience[0].duration.as_deref(), Some("2019"));
    }

    #[test]
    fn education_details_filters_and_caps() {
        let doc = Html::parse_document(
            r#"<ul class="pvs-list__paged-list-items">
                 <li><div class="t-bold"><span aria-hidden="true">MIT</span></div>
                     <div class="t-normal"><span aria-hidden="true">BSc Computer Science</span></div></li>
                 <li><div class="t-bold"><span aria-hidden="true">Show more results</span></div></li>
                 <li><div class="t-bold"><span aria-hidden="true">ETH Zurich</span></div>
                     <div class="t-black--light"><span aria-hidden="true">2010 - 2012</span></div></li>
                 <li><div class="t-bold"><span aria-hidden="true">Fourth School</span></div></li>
               </ul>"#,
        );
        let education = education_details(&doc);
        assert_eq!(education.len(), 2);
        assert_eq!(education[0].school.as_deref(), Some("MIT"));
        assert_eq!(education[1].duration.as_deref(), Some("2010 - 2012"));
    }

    #[test]
    fn activity_uses_fallback_selectors() {
        let doc = Html::parse_document(
            r#"<div class="feed-shared-update-v2">
                 <span class="break-words">Shipped a new release of our engine</span>
                 <time>2 weeks ago</time>
               </div>
               <div class="feed-shared-update-v2"><span class="break-words">short</span></div>"#,
        );
        let posts = activity_posts(&doc);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].date.as_deref(), Some("2 weeks ago"));
        assert!(posts[0].text.as_deref().unwrap().starts_with("Shipped"));
    }

    #[test]
    fn recommendations_need_two_fields() {
        let doc = Html::parse_document(
            r#"<ul class="pvs-list__paged-list-items">
                 <li><div class="t-bold"><span aria-hidden="true">Ann Lee</span></div>
                     <div class="t-normal"><span aria-hidden="true">CTO at Foo</span></div></li>
                 <li><div class="t-bold"><span aria-hidden="true">Bob</span></div></li>
               </ul>"#,
        );
        let recs = recommendations(&doc);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommender_title.as_deref(), Some("CTO at Foo"));
    }
}
