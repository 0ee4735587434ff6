//! Field detection over plain resume text.
//!
//! Pure functions, no I/O. All patterns are compiled once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::normalize::{normalize, SkillSet};
use crate::extraction::{excerpt, ExtractedResume};

const MAX_EDUCATION_LINES: usize = 3;

/// Skills looked for in every resume, in reporting order.
pub const DEFAULT_SKILL_KEYWORDS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "C++",
    "C#",
    "SQL",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "Spring",
    "Machine Learning",
    "Deep Learning",
    "AI",
    "Data Science",
    "Analytics",
    "Git",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
];

const NAME_SKIP_WORDS: &[&str] = &[
    "University",
    "College",
    "School",
    "Academy",
    "Department",
    "Institute",
    "Project",
    "Simulation",
    "Challenge",
    "Technologies",
    "Development",
    "About",
    "Skills",
    "Education",
    "Experience",
    "Achievements",
    "Publications",
    "Certifications",
    "Participation",
    "Awards",
    "Blood Group",
    "Based Blood",
    "Brain Tumor",
    "License Plate",
    "Fingerprint Based",
    "Vision Transformers",
    "Smart Mobility",
    "Based Classification",
    "Space Apps",
    "Innovation Challenge",
    "Junior College",
    "Sales Academy",
    "User Segmentation",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z0-9][a-zA-Z0-9._%+-]*@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b")
        .expect("email pattern is valid")
});

// PDF text extraction sometimes drops the '@': "ashagmail.com".
static BROKEN_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([a-z0-9][a-z0-9._%+-]*)(gmail|yahoo|outlook|hotmail|email|icloud)\.com\b")
        .expect("broken email pattern is valid")
});

// Indian mobile numbers: 10 digits starting 6-9, optional +91 prefix.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\D)(?:\+?91[\s-]?)?([6-9]\d{9})(?:\D|$)").expect("phone pattern is valid")
});

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][a-z]+[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){0,2}")
        .expect("name pattern is valid")
});

static EDUCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(bachelor|master|phd|ph\.d|diploma|degree|university|college|b\.tech|m\.tech|btech|mtech|bsc|msc|b\.sc|m\.sc|b\.e|m\.e)\b",
    )
    .expect("education pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Experience,
    Certifications,
    Other,
}

/// Case-insensitive whole-term matcher over a skill vocabulary.
///
/// "Java" does not fire on "JavaScript", "AI" does not fire on "maintain".
pub struct SkillMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SkillMatcher {
    /// Builds a matcher; duplicate keywords (after normalization) keep their first spelling.
    pub fn new<I, S>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary: SkillSet = keywords.into_iter().collect();
        let mut patterns = Vec::with_capacity(vocabulary.len());
        for keyword in vocabulary.display() {
            let pattern = format!(
                r"(?i)(?:^|[^a-z0-9]){}(?:[^a-z0-9+#]|$)",
                regex::escape(keyword)
            );
            patterns.push((keyword.clone(), Regex::new(&pattern)?));
        }
        Ok(Self { patterns })
    }

    pub fn with_defaults() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_SKILL_KEYWORDS)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Vocabulary entries present in `text`, in vocabulary order.
    pub fn find(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }
}

/// Runs every field detector over `text`.
pub fn extract_fields(text: &str, skills: &SkillMatcher) -> ExtractedResume {
    ExtractedResume {
        name: extract_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
        skills: skills.find(text),
        experience: section_lines(text, Section::Experience),
        education: extract_education(text),
        certifications: section_lines(text, Section::Certifications),
        text_excerpt: Some(excerpt(text)),
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    let candidate = EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            BROKEN_EMAIL_RE
                .captures(text)
                .map(|caps| format!("{}@{}.com", &caps[1], &caps[2].to_lowercase()))
        })?;

    (candidate.len() > 5 && candidate.contains('@')).then_some(candidate)
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.captures(text).map(|caps| caps[1].to_string())
}

/// 2–4 capitalized words that are not a known heading or institution phrase.
/// A 3-word candidate wins over an earlier 2- or 4-word one.
pub fn extract_name(text: &str) -> Option<String> {
    let candidates: Vec<&str> = NAME_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|name| !is_skipped_name(name))
        .collect();

    candidates
        .iter()
        .find(|name| name.split_whitespace().count() == 3)
        .or_else(|| candidates.first())
        .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn is_skipped_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    NAME_SKIP_WORDS
        .iter()
        .any(|skip| lower.contains(&skip.to_lowercase()))
}

/// Lines mentioning a degree or institution, each followed by its next line.
pub fn extract_education(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut found: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !EDUCATION_RE.is_match(line) {
            continue;
        }
        for candidate in [Some(*line), lines.get(i + 1).copied()].into_iter().flatten() {
            if !candidate.is_empty() && !found.iter().any(|f| f == candidate) {
                found.push(candidate.to_string());
            }
        }
        if found.len() >= MAX_EDUCATION_LINES {
            break;
        }
    }

    found.truncate(MAX_EDUCATION_LINES);
    found
}

/// Body lines under the headings mapped to `wanted`, up to the next heading.
fn section_lines(text: &str, wanted: Section) -> Vec<String> {
    let mut current: Option<Section> = None;
    let mut out = Vec::new();

    for line in text.lines() {
        if let Some(section) = heading(line) {
            current = Some(section);
            continue;
        }
        if current != Some(wanted) {
            continue;
        }
        let item = line
            .trim()
            .trim_start_matches(|c: char| matches!(c, '•' | '-' | '*' | '▪' | '◦'))
            .trim();
        if !item.is_empty() {
            out.push(item.to_string());
        }
    }

    out
}

fn heading(line: &str) -> Option<Section> {
    let key = normalize(line);
    let key = key.trim_end_matches(':').trim_end();
    match key {
        "experience" | "work experience" | "professional experience" | "employment"
        | "employment history" | "internships" | "internship" => Some(Section::Experience),
        "certifications" | "certification" | "certificates" | "licenses & certifications" => {
            Some(Section::Certifications)
        }
        "education" | "skills" | "technical skills" | "projects" | "achievements" | "awards"
        | "publications" | "about" | "about me" | "summary" | "profile" | "contact"
        | "languages" | "interests" | "hobbies" | "extracurricular activities" => {
            Some(Section::Other)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Asha Kumari Rao
ashakrao@gmail.com | +91 9876543210
About
Backend engineer who enjoys JavaScript, Node.js and MongoDB.
Education
B.Tech in Computer Science
National Institute of Technology, 2018 - 2022
Experience
• Software Engineer Intern, Acme Corp
- Built REST APIs with Express and Docker
Skills
Python, SQL, Git, Communication
Certifications
AWS Certified Cloud Practitioner
Projects
License Plate Recognition
";

    fn matcher() -> SkillMatcher {
        SkillMatcher::with_defaults().unwrap()
    }

    #[test]
    fn test_extracts_email() {
        assert_eq!(
            extract_email(SAMPLE_RESUME).as_deref(),
            Some("ashakrao@gmail.com")
        );
    }

    #[test]
    fn test_repairs_email_missing_at_sign() {
        let text = "Contact: ravi.k99gmail.com, Pune";
        assert_eq!(extract_email(text).as_deref(), Some("ravi.k99@gmail.com"));
    }

    #[test]
    fn test_no_email_is_none() {
        assert_eq!(extract_email("no contact details here"), None);
    }

    #[test]
    fn test_extracts_phone_with_country_code() {
        assert_eq!(extract_phone(SAMPLE_RESUME).as_deref(), Some("9876543210"));
        assert_eq!(
            extract_phone("call +919812345678 now").as_deref(),
            Some("9812345678")
        );
    }

    #[test]
    fn test_phone_ignores_longer_digit_runs_and_bad_prefix() {
        assert_eq!(extract_phone("id 123456789012345"), None);
        assert_eq!(extract_phone("5123456789"), None);
    }

    #[test]
    fn test_prefers_three_word_name() {
        assert_eq!(
            extract_name(SAMPLE_RESUME).as_deref(),
            Some("Asha Kumari Rao")
        );
    }

    #[test]
    fn test_name_skips_institution_phrases() {
        let text = "Junior College Mumbai\nRohan Mehta\n";
        assert_eq!(extract_name(text).as_deref(), Some("Rohan Mehta"));
    }

    #[test]
    fn test_no_name_is_none() {
        assert_eq!(extract_name("lowercase text only"), None);
    }

    #[test]
    fn test_skill_matching_whole_terms() {
        let skills = matcher().find(SAMPLE_RESUME);
        for expected in ["Python", "JavaScript", "SQL", "Node.js", "Git", "Docker", "AWS", "MongoDB", "Communication"] {
            assert!(skills.contains(&expected.to_string()), "missing {expected}");
        }
        // "Java" only appears inside "JavaScript"
        assert!(!skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let skills = matcher().find("worked with KUBERNETES and react");
        assert_eq!(skills, vec!["React", "Kubernetes"]);
    }

    #[test]
    fn test_symbol_skills() {
        let skills = matcher().find("Languages: C++, C#");
        assert!(skills.contains(&"C++".to_string()));
        assert!(skills.contains(&"C#".to_string()));
    }

    #[test]
    fn test_no_skills_is_empty_not_placeholder() {
        assert!(matcher().find("nothing relevant").is_empty());
    }

    #[test]
    fn test_custom_vocabulary_dedupes() {
        let m = SkillMatcher::new(["Pandas", "pandas", "Linux"]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.find("pandas on linux"), vec!["Pandas", "Linux"]);
    }

    #[test]
    fn test_education_lines() {
        let education = extract_education(SAMPLE_RESUME);
        assert_eq!(
            education,
            vec![
                "B.Tech in Computer Science",
                "National Institute of Technology, 2018 - 2022",
            ]
        );
    }

    #[test]
    fn test_education_capped_at_three_lines() {
        let text = "Bachelor of Arts\nline a\nMaster of Science\nline b\nPhD\n";
        assert_eq!(extract_education(text).len(), 3);
    }

    #[test]
    fn test_experience_section() {
        let fields = extract_fields(SAMPLE_RESUME, &matcher());
        assert_eq!(
            fields.experience,
            vec![
                "Software Engineer Intern, Acme Corp",
                "Built REST APIs with Express and Docker",
            ]
        );
    }

    #[test]
    fn test_certification_section() {
        let fields = extract_fields(SAMPLE_RESUME, &matcher());
        assert_eq!(
            fields.certifications,
            vec!["AWS Certified Cloud Practitioner"]
        );
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let long = "x".repeat(2_000);
        let fields = extract_fields(&long, &matcher());
        assert_eq!(fields.text_excerpt.map(|e| e.chars().count()), Some(500));
    }
}
