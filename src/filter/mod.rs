//! Filtering capabilities for survey tables
//!
//! An expression-based filtering system over Arrow record batches, used to
//! select the population of interest before recoding.

pub mod core;
pub mod error;
pub mod expr;

pub use self::core::{BatchFilter, filter_record_batch};
pub use expr::{Expr, ExpressionFilter, LiteralValue, evaluate_expr};

/// The population filter: respondents of `country` who gave an answer
///
/// `country = <country> AND support != <no_answer_code>`
#[must_use]
pub fn population_filter(
    country_field: &str,
    country: &str,
    support_field: &str,
    no_answer_code: i64,
) -> ExpressionFilter {
    ExpressionFilter::new(Expr::And(vec![
        Expr::Eq(
            country_field.to_string(),
            LiteralValue::String(country.to_string()),
        ),
        Expr::NotEq(support_field.to_string(), LiteralValue::Int(no_answer_code)),
    ]))
}
