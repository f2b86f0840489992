//! Translation of listing query parameters into a store filter.

use jobboard_db::jobs::JobsRow;
use jobboard_db::query::{Filter, JobField, JobSort};
use serde::Deserialize;

/// Query string accepted by `GET /jobs`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    /// Comma-separated job types.
    pub jtype: Option<String>,
    /// Experience range, `"lo-hi"`.
    pub exp: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Empty parameters are treated as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn build_filter(query: &JobListQuery) -> Filter {
    let mut clauses = Vec::new();

    if let Some(search) = present(&query.search) {
        clauses.push(Filter::Or(vec![
            Filter::contains(JobField::Title, search),
            Filter::contains(JobField::Type, search),
        ]));
    }

    if let Some(location) = present(&query.location) {
        clauses.push(Filter::contains(JobField::Location, location));
    }

    if let Some(jtype) = present(&query.jtype) {
        clauses.push(Filter::AnyOf {
            field: JobField::Type,
            values: jtype.split(',').map(str::to_string).collect(),
        });
    }

    if let Some(exp) = present(&query.exp) {
        let (min, max) = experience_bounds(exp);
        clauses.push(Filter::Between {
            field: JobField::Experience,
            min,
            max,
        });
    }

    Filter::all_of(clauses)
}

/// Bounds for an `"lo-hi"` range, widened by one on each side.
///
/// An empty component reads as 0; a missing or non-numeric one yields NaN,
/// which the store treats as matching nothing.
pub fn experience_bounds(raw: &str) -> (f64, f64) {
    let mut parts = raw.split('-');
    let lo = parse_bound(parts.next());
    let hi = parse_bound(parts.next());
    (lo - 1.0, hi + 1.0)
}

fn parse_bound(part: Option<&str>) -> f64 {
    match part.map(str::trim) {
        None => f64::NAN,
        Some("") => 0.0,
        Some(s) => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Unknown keys fall back to newest-first.
pub fn parse_sort(raw: Option<&str>) -> JobSort {
    match raw {
        Some("Newest") => JobSort::Newest,
        Some("Oldest") => JobSort::Oldest,
        Some("A-Z") => JobSort::TitleAsc,
        Some("Z-A") => JobSort::TitleDesc,
        _ => JobSort::default(),
    }
}

/// Postings whose title contains this job's title or whose type contains
/// this job's type.
pub fn similar_filter(job: &JobsRow) -> Filter {
    Filter::Or(vec![
        Filter::contains(JobField::Title, job.job_title.as_str()),
        Filter::contains(JobField::Type, job.job_type.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> JobListQuery {
        let mut q = JobListQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "search" => q.search = v,
                "location" => q.location = v,
                "jtype" => q.jtype = v,
                "exp" => q.exp = v,
                other => panic!("unexpected key {other}"),
            }
        }
        q
    }

    #[test]
    fn no_parameters_means_no_clauses() {
        assert_eq!(build_filter(&JobListQuery::default()), Filter::All);
        assert_eq!(build_filter(&query(&[("search", ""), ("exp", "")])), Filter::All);
    }

    #[test]
    fn search_matches_title_or_type() {
        let filter = build_filter(&query(&[("search", "dev")]));
        assert_eq!(
            filter,
            Filter::Or(vec![
                Filter::contains(JobField::Title, "dev"),
                Filter::contains(JobField::Type, "dev"),
            ])
        );
    }

    #[test]
    fn job_types_are_split_verbatim() {
        let filter = build_filter(&query(&[("jtype", "Full-time,Remote")]));
        assert_eq!(
            filter,
            Filter::AnyOf {
                field: JobField::Type,
                values: vec!["Full-time".into(), "Remote".into()],
            }
        );
    }

    #[test]
    fn clauses_are_conjoined() {
        let filter = build_filter(&query(&[("location", "porto"), ("exp", "2-4")]));
        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::contains(JobField::Location, "porto"),
                Filter::Between {
                    field: JobField::Experience,
                    min: 1.0,
                    max: 5.0,
                },
            ])
        );
    }

    #[test]
    fn experience_range_is_widened_by_one() {
        assert_eq!(experience_bounds("1-3"), (0.0, 4.0));
        assert_eq!(experience_bounds("0-0"), (-1.0, 1.0));
        assert_eq!(experience_bounds("-3"), (-1.0, 4.0));
    }

    #[test]
    fn malformed_experience_yields_nan() {
        let (lo, hi) = experience_bounds("5");
        assert_eq!(lo, 4.0);
        assert!(hi.is_nan());
        let (lo, _) = experience_bounds("abc-3");
        assert!(lo.is_nan());
    }

    #[test]
    fn sort_keys() {
        assert_eq!(parse_sort(Some("A-Z")), JobSort::TitleAsc);
        assert_eq!(parse_sort(Some("Z-A")), JobSort::TitleDesc);
        assert_eq!(parse_sort(Some("Oldest")), JobSort::Oldest);
        assert_eq!(parse_sort(Some("Newest")), JobSort::Newest);
        assert_eq!(parse_sort(Some("by-salary")), JobSort::Newest);
        assert_eq!(parse_sort(None), JobSort::Newest);
    }
}
