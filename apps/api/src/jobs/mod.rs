// Job catalog: sample postings, filtering, and ranking against a resume.
// Ranking uses the same KeywordMatcher as single comparisons.

pub mod handlers;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::KeywordMatcher;
use crate::models::job::{Job, RankedJob};

const COMPANIES: &[&str] = &[
    "TechCorp",
    "InnovateLabs",
    "CloudSys",
    "DataDrive",
    "WebForce",
    "ByteStream",
    "CodeNation",
];

const LOCATIONS: &[&str] = &["Bangalore", "Hyderabad", "Mumbai", "Pune", "Delhi"];

/// (title, level, required skills)
const POSITIONS: &[(&str, &str, &str)] = &[
    (
        "Senior Full Stack Developer",
        "Senior",
        "React, Node.js, TypeScript, MongoDB, PostgreSQL, Docker, AWS, Express, REST APIs, GraphQL, Redux, Microservices, Git, CICD",
    ),
    (
        "React Developer",
        "Mid",
        "React, JavaScript, TypeScript, Redux, REST APIs, GraphQL, Tailwind CSS, Webpack, Testing, Git",
    ),
    (
        "Node.js Backend Developer",
        "Mid",
        "Node.js, Express, MongoDB, PostgreSQL, REST APIs, Microservices, GraphQL, JWT, Redis, Docker",
    ),
    (
        "Full Stack Engineer",
        "Senior",
        "Full Stack Development, React, Node.js, Database Design, REST APIs, Docker, AWS",
    ),
    (
        "Junior Software Engineer",
        "Junior",
        "JavaScript, HTML, CSS, React, Git, Problem Solving, Testing",
    ),
    (
        "DevOps Engineer",
        "Mid",
        "Docker, Kubernetes, AWS, CI/CD, Linux, Infrastructure, Monitoring, Jenkins, GitLab",
    ),
    (
        "Solutions Architect",
        "Senior",
        "System Design, Architecture, Cloud Platforms, Leadership, Technical Mentoring, Microservices",
    ),
];

/// Query filters for `GET /api/jobs`. The value `all` disables a filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub experience: Option<String>,
    /// Minimum base salary (LPA).
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
    /// Case-insensitive match on position or company.
    pub search: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "all")
}

/// Distinct values offered by the catalog UI filters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub experiences: Vec<String>,
    pub levels: Vec<String>,
    pub job_types: Vec<String>,
    pub locations: Vec<String>,
    pub salaries: Vec<u32>,
}

pub struct JobCatalog {
    jobs: Vec<Job>,
}

impl JobCatalog {
    /// Every position at every company. Attributes are derived from the indices.
    pub fn sample() -> Self {
        let now = Utc::now();
        let mut jobs = Vec::with_capacity(POSITIONS.len() * COMPANIES.len());

        for (pos_idx, (title, level, skills)) in POSITIONS.iter().enumerate() {
            for (comp_idx, company) in COMPANIES.iter().enumerate() {
                let base_salary = 20 + comp_idx * 5;
                let min_years = 2 + pos_idx % 3;
                let id = jobs.len() + 1;

                jobs.push(Job {
                    id: format!("job_{id}"),
                    position: title.to_string(),
                    company: company.to_string(),
                    location: format!("{}, India", LOCATIONS[(pos_idx + comp_idx) % LOCATIONS.len()]),
                    salary: format!("{base_salary} - {} LPA", base_salary + 10),
                    experience: format!("{min_years} - {} years", min_years + 3),
                    job_type: if (pos_idx + comp_idx) % 2 == 0 {
                        "Full-time".to_string()
                    } else {
                        "Contract".to_string()
                    },
                    level: level.to_string(),
                    description: sample_description(title, level, skills),
                    posted_date: now - Duration::days(((pos_idx * 7 + comp_idx) % 30) as i64),
                });
            }
        }

        Self { jobs }
    }

    pub fn all(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn search(&self, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
        let min_salary = active(&filter.salary)
            .map(|raw| {
                raw.parse::<u32>().map_err(|_| {
                    AppError::Validation(format!("salary filter must be a number, got '{raw}'"))
                })
            })
            .transpose()?;
        let search = active(&filter.search).map(str::to_lowercase);

        Ok(self
            .jobs
            .iter()
            .filter(|job| active(&filter.experience).map_or(true, |e| job.experience.contains(e)))
            .filter(|job| {
                min_salary.map_or(true, |min| job.base_salary().is_some_and(|base| base >= min))
            })
            .filter(|job| active(&filter.job_type).map_or(true, |t| job.job_type == t))
            .filter(|job| active(&filter.level).map_or(true, |l| job.level == l))
            .filter(|job| active(&filter.location).map_or(true, |l| job.location.contains(l)))
            .filter(|job| {
                search.as_deref().map_or(true, |s| {
                    job.position.to_lowercase().contains(s) || job.company.to_lowercase().contains(s)
                })
            })
            .cloned()
            .collect())
    }

    pub fn filter_options(&self) -> FilterOptions {
        let mut salaries: Vec<u32> = self
            .jobs
            .iter()
            .filter_map(Job::base_salary)
            .map(|base| base.div_ceil(10) * 10)
            .collect();
        salaries.sort_unstable();
        salaries.dedup();

        FilterOptions {
            experiences: distinct(self.jobs.iter().map(|j| j.experience.as_str())),
            levels: distinct(self.jobs.iter().map(|j| j.level.as_str())),
            job_types: distinct(self.jobs.iter().map(|j| j.job_type.as_str())),
            locations: distinct(self.jobs.iter().map(Job::city)),
            salaries,
        }
    }

    /// Scores every job against the resume, best match first.
    /// The sort is stable, so equal scores keep catalog order.
    pub fn rank(&self, resume_text: &str, matcher: &KeywordMatcher) -> Vec<RankedJob> {
        let mut ranked: Vec<RankedJob> = self
            .jobs
            .iter()
            .map(|job| {
                let result = matcher.analyze_match(resume_text, &job.description);
                RankedJob {
                    job: job.clone(),
                    match_percentage: result.match_percentage,
                    matched_keywords: result.matched_keywords,
                    missing_skills: result.missing_skills,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        ranked
    }
}

/// First-seen order, duplicates removed.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

fn sample_description(title: &str, level: &str, skills: &str) -> String {
    let growth = if level == "Senior" {
        "Mentor junior developers and lead technical initiatives"
    } else {
        "Contribute to feature development"
    };
    format!(
        "We are looking for a {title} to join our team.\n\n\
         Required Skills:\n{skills}\n\n\
         About the Role:\n\
         - Design and develop scalable applications\n\
         - Collaborate with cross-functional teams\n\
         - Write clean, maintainable, and well-tested code\n\
         - Participate in code reviews and architectural discussions\n\
         - {growth}\n\n\
         Why Join Us:\n\
         - Competitive salary and benefits\n\
         - Flexible work arrangements\n\
         - Career growth opportunities\n\
         - Learning and development programs\n\
         - Collaborative and innovative work environment\n"
    )
}
