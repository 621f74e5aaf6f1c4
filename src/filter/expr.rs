//! Expression-based filtering for survey data
//!
//! Expressions are evaluated against Arrow record batches with vectorized
//! compute kernels. Comparisons follow SQL null semantics: a null value never
//! satisfies `Eq` or `NotEq`, so such rows are dropped by the filter.

use std::collections::HashSet;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::compute::kernels::cmp::{eq, neq};
use arrow::compute::{and, cast, is_not_null, not, or};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::filter::error::{FilterResultExt, column_not_found, filter_err};

/// Represents a filter expression over record batch columns
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Column not equals a literal value
    NotEq(String, LiteralValue),

    /// Column is not null
    IsNotNull(String),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Logical OR of expressions
    Or(Vec<Expr>),

    /// Logical NOT of an expression
    Not(Box<Expr>),
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Integer value
    Int(i64),

    /// Floating point value
    Float(f64),

    /// String value
    String(String),
}

impl Expr {
    /// Returns a set of all column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::Eq(col, _) | Self::NotEq(col, _) | Self::IsNotNull(col) => {
                columns.insert(col.clone());
            }
            Self::And(exprs) | Self::Or(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
            Self::Not(expr) => expr.collect_required_columns(columns),
        }
    }
}

/// A filter that evaluates an expression against a record batch
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the filter's expression to a row mask
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        evaluate_expr(batch, &self.expr)
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.evaluate(batch)?;
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        self.expr.required_columns()
    }
}

/// Evaluate an expression against a record batch
///
/// # Returns
/// A boolean array indicating which rows match the expression; null entries
/// mean "unknown" and are treated as non-matching by [`filter_record_batch`]
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::And(exprs) => combine(batch, exprs, true),
        Expr::Or(exprs) => combine(batch, exprs, false),
        Expr::Not(inner) => {
            let mask = evaluate_expr(batch, inner)?;
            Ok(not(&mask)?)
        }
        Expr::IsNotNull(col_name) => {
            let column = get_column(batch, col_name)?;
            Ok(is_not_null(column.as_ref())?)
        }
        Expr::Eq(col_name, literal) => compare(batch, col_name, literal, false),
        Expr::NotEq(col_name, literal) => compare(batch, col_name, literal, true),
    }
}

fn combine(batch: &RecordBatch, exprs: &[Expr], conjunction: bool) -> Result<BooleanArray> {
    let Some((first, rest)) = exprs.split_first() else {
        return Ok(BooleanArray::from(vec![conjunction; batch.num_rows()]));
    };

    let mut result = evaluate_expr(batch, first)?;
    for expr in rest {
        let mask = evaluate_expr(batch, expr)?;
        result = if conjunction {
            and(&result, &mask)?
        } else {
            or(&result, &mask)?
        };
    }
    Ok(result)
}

fn get_column<'a>(batch: &'a RecordBatch, col_name: &str) -> Result<&'a ArrayRef> {
    match batch.schema_ref().index_of(col_name) {
        Ok(idx) => Ok(batch.column(idx)),
        Err(_) => column_not_found(col_name),
    }
}

/// Compare a column with a literal, casting the column to the literal's type
fn compare(
    batch: &RecordBatch,
    col_name: &str,
    literal: &LiteralValue,
    negate: bool,
) -> Result<BooleanArray> {
    let column = get_column(batch, col_name)?;

    #[allow(clippy::cast_precision_loss)]
    let target = match literal {
        LiteralValue::String(s) => return compare_text(column, col_name, s, negate),
        LiteralValue::Int(n) => *n as f64,
        LiteralValue::Float(f) => *f,
    };

    let values = cast(column, &DataType::Float64).with_column_context(col_name)?;
    let Some(values) = values.as_any().downcast_ref::<Float64Array>() else {
        return filter_err(format!("Column '{col_name}' is not numeric"));
    };
    let scalar = Float64Array::new_scalar(target);
    let mask = if negate {
        neq(values, &scalar)
    } else {
        eq(values, &scalar)
    };
    mask.with_column_context(col_name)
}

fn compare_text(
    column: &ArrayRef,
    col_name: &str,
    literal: &str,
    negate: bool,
) -> Result<BooleanArray> {
    let values = cast(column, &DataType::Utf8).with_column_context(col_name)?;
    let Some(values) = values.as_any().downcast_ref::<StringArray>() else {
        return filter_err(format!("Column '{col_name}' could not be read as text"));
    };
    let scalar = StringArray::new_scalar(literal);
    let mask = if negate {
        neq(values, &scalar)
    } else {
        eq(values, &scalar)
    };
    mask.with_column_context(col_name)
}
