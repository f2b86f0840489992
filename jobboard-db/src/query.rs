//! Store-native filter expressions over job postings.
//!
//! A [`Filter`] is a small boolean expression tree that renders into a
//! parameterised SQL predicate. Every user-supplied value is bound, never
//! spliced into the statement text.

use sqlx::{QueryBuilder, Sqlite};

/// Job columns a filter may address. Columns are qualified with the `j`
/// alias every job query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Type,
    Location,
    Experience,
}

impl JobField {
    pub const fn column(self) -> &'static str {
        match self {
            JobField::Title => "j.job_title",
            JobField::Type => "j.job_type",
            JobField::Location => "j.location",
            JobField::Experience => "j.experience",
        }
    }

    /// Column holding the case-folded text, compared against a folded needle.
    pub const fn folded_column(self) -> &'static str {
        match self {
            JobField::Title => "j.job_title_folded",
            JobField::Type => "j.job_type_folded",
            JobField::Location => "j.location_folded",
            JobField::Experience => "j.experience",
        }
    }
}

/// Case folding applied both to stored search columns and to needles.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every posting.
    All,
    /// Matches no posting.
    Nothing,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    /// Case-insensitive (Unicode) literal substring match.
    ContainsIgnoreCase { field: JobField, needle: String },
    /// Exact match against any of the values.
    AnyOf { field: JobField, values: Vec<String> },
    /// Inclusive numeric range. A NaN bound matches nothing.
    Between { field: JobField, min: f64, max: f64 },
}

impl Filter {
    /// Conjunction that collapses the trivial cases.
    pub fn all_of(mut clauses: Vec<Filter>) -> Filter {
        match clauses.len() {
            0 => Filter::All,
            1 => clauses.remove(0),
            _ => Filter::And(clauses),
        }
    }

    pub fn contains(field: JobField, needle: impl Into<String>) -> Filter {
        Filter::ContainsIgnoreCase {
            field,
            needle: needle.into(),
        }
    }

    /// Append this filter as a SQL predicate.
    pub fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Filter::All => {
                qb.push("1 = 1");
            }
            Filter::Nothing => {
                qb.push("0 = 1");
            }
            Filter::And(clauses) => push_joined(qb, clauses, " AND ", "1 = 1"),
            Filter::Or(clauses) => push_joined(qb, clauses, " OR ", "0 = 1"),
            Filter::ContainsIgnoreCase { field, needle } => {
                qb.push("instr(")
                    .push(field.folded_column())
                    .push(", ")
                    .push_bind(fold_case(needle))
                    .push(") > 0");
            }
            Filter::AnyOf { field, values } => {
                if values.is_empty() {
                    qb.push("0 = 1");
                    return;
                }
                qb.push(field.column()).push(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        qb.push(", ");
                    }
                    qb.push_bind(value.clone());
                }
                qb.push(")");
            }
            Filter::Between { field, min, max } => {
                if min.is_nan() || max.is_nan() {
                    qb.push("0 = 1");
                    return;
                }
                qb.push("(")
                    .push(field.column())
                    .push(" >= ")
                    .push_bind(*min)
                    .push(" AND ")
                    .push(field.column())
                    .push(" <= ")
                    .push_bind(*max)
                    .push(")");
            }
        }
    }
}

fn push_joined(qb: &mut QueryBuilder<'_, Sqlite>, clauses: &[Filter], sep: &str, empty: &str) {
    if clauses.is_empty() {
        qb.push(empty);
        return;
    }
    qb.push("(");
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            qb.push(sep);
        }
        clause.push_sql(qb);
    }
    qb.push(")");
}

/// Result orderings supported by job queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    #[default]
    Newest,
    Oldest,
    TitleAsc,
    TitleDesc,
    /// Identifier descending; ids are time-ordered so this is recency.
    IdDesc,
}

impl JobSort {
    pub const fn order_by(self) -> &'static str {
        match self {
            JobSort::Newest => "j.created_at DESC, j.id DESC",
            JobSort::Oldest => "j.created_at ASC, j.id ASC",
            JobSort::TitleAsc => "j.job_title ASC, j.id ASC",
            JobSort::TitleDesc => "j.job_title DESC, j.id DESC",
            JobSort::IdDesc => "j.id DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(filter: &Filter) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        filter.push_sql(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn all_of_collapses_trivial_conjunctions() {
        assert_eq!(Filter::all_of(vec![]), Filter::All);
        let single = Filter::contains(JobField::Location, "berlin");
        assert_eq!(Filter::all_of(vec![single.clone()]), single);
    }

    #[test]
    fn contains_binds_the_needle() {
        let sql = render(&Filter::contains(JobField::Title, "rust'; DROP TABLE jobs; --"));
        assert_eq!(sql, "instr(j.job_title_folded, ?) > 0");
    }

    #[test]
    fn folding_handles_non_ascii() {
        assert_eq!(fold_case("ZÜRICH"), "zürich");
        assert_eq!(fold_case("Ångström Développeur"), "ångström développeur");
    }

    #[test]
    fn any_of_renders_one_placeholder_per_value() {
        let sql = render(&Filter::AnyOf {
            field: JobField::Type,
            values: vec!["Full-time".into(), "Remote".into()],
        });
        assert_eq!(sql, "j.job_type IN (?, ?)");
        let empty = render(&Filter::AnyOf {
            field: JobField::Type,
            values: vec![],
        });
        assert_eq!(empty, "0 = 1");
    }

    #[test]
    fn nan_range_matches_nothing() {
        let sql = render(&Filter::Between {
            field: JobField::Experience,
            min: f64::NAN,
            max: 4.0,
        });
        assert_eq!(sql, "0 = 1");
    }

    #[test]
    fn nested_expression_is_parenthesised() {
        let filter = Filter::all_of(vec![
            Filter::Or(vec![
                Filter::contains(JobField::Title, "dev"),
                Filter::contains(JobField::Type, "dev"),
            ]),
            Filter::Between {
                field: JobField::Experience,
                min: 0.0,
                max: 3.0,
            },
        ]);
        assert_eq!(
            render(&filter),
            "((instr(j.job_title_folded, ?) > 0 OR instr(j.job_type_folded, ?) > 0) AND (j.experience >= ? AND j.experience <= ?))"
        );
    }
}
