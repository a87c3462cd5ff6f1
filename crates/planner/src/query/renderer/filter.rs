use crate::{error::CompileError, query::renderer::Renderer};
use model::{
    core::{operator::FilterOperator, value::Value},
    filter::{condition::FilterCondition, validation::parse_in_values},
};

enum LikePattern {
    Contains,
    Prefix,
    Suffix,
}

impl Renderer<'_> {
    /// Renders one condition into a WHERE-clause fragment.
    ///
    /// `Ok(None)` means the row is skipped (blank column or operator, unknown
    /// operator, missing operand, empty `in` list). Only a `between` without
    /// both bounds is reported as an error; the caller's policy decides what
    /// to do with it. Parameters are recorded only for fragments that are
    /// returned.
    pub fn render_condition(
        &mut self,
        condition: &FilterCondition,
    ) -> Result<Option<String>, CompileError> {
        let Some((column, op)) = condition.target() else {
            return Ok(None);
        };
        let col = self.quote(column);

        let fragment = match op {
            FilterOperator::IsNull => format!("{col} IS NULL"),
            FilterOperator::IsNotNull => format!("{col} IS NOT NULL"),

            FilterOperator::Between => {
                let (Some(low), Some(high)) = (condition.value.as_ref(), condition.second_value())
                else {
                    return Err(CompileError::MissingSecondValue {
                        column: column.to_string(),
                    });
                };
                let low = self.add_param(low.clone());
                let high = self.add_param(high.clone());
                format!("{col} BETWEEN {low} AND {high}")
            }

            FilterOperator::In => {
                let values = condition
                    .value
                    .as_ref()
                    .map(parse_in_values)
                    .unwrap_or_default();
                if values.is_empty() {
                    return Ok(None);
                }
                let placeholders = values
                    .into_iter()
                    .map(|v| self.add_param(v))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{col} IN ({placeholders})")
            }

            FilterOperator::Contains
            | FilterOperator::NotContains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith => {
                let Some(value) = condition.value.as_ref() else {
                    return Ok(None);
                };
                let (pattern, negated) = match op {
                    FilterOperator::StartsWith => (LikePattern::Prefix, false),
                    FilterOperator::EndsWith => (LikePattern::Suffix, false),
                    FilterOperator::NotContains => (LikePattern::Contains, true),
                    _ => (LikePattern::Contains, false),
                };
                self.render_like(&col, value, pattern, negated)
            }

            FilterOperator::Equals
            | FilterOperator::NotEquals
            | FilterOperator::GreaterThan
            | FilterOperator::LessThan
            | FilterOperator::GreaterOrEqual
            | FilterOperator::LessOrEqual => {
                let Some(value) = condition.value.as_ref() else {
                    return Ok(None);
                };
                let placeholder = self.add_param(value.clone());
                format!("{col} {} {placeholder}", op.info().symbol)
            }
        };

        Ok(Some(fragment))
    }

    fn render_like(&mut self, col: &str, value: &Value, pattern: LikePattern, negated: bool) -> String {
        let raw = value.as_string();
        let escaped = self.dialect.escape_like(&raw);
        let needs_escape_clause = escaped != raw;

        let wrapped = match pattern {
            LikePattern::Contains => format!("%{escaped}%"),
            LikePattern::Prefix => format!("{escaped}%"),
            LikePattern::Suffix => format!("%{escaped}"),
        };

        let target = self.dialect.text_expr(col);
        let like = self.dialect.like_operator(negated);
        let placeholder = self.add_param(Value::String(wrapped));

        match self.dialect.escape_clause() {
            Some(clause) if needs_escape_clause => format!("{target} {like} {placeholder} {clause}"),
            _ => format!("{target} {like} {placeholder}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::CompileError,
        query::{
            dialect::{MySql, Postgres, SqlServer, Sqlite},
            renderer::{ParamStyle, Renderer},
        },
    };
    use model::{
        core::{operator::FilterOperator, value::Value},
        filter::condition::FilterCondition,
    };

    fn render(r: &mut Renderer, c: FilterCondition) -> Option<String> {
        r.render_condition(&c).unwrap()
    }

    #[test]
    fn test_render_comparison_postgres() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let c = FilterCondition::new("1", "age", FilterOperator::GreaterOrEqual).with_value(21);
        assert_eq!(render(&mut r, c).unwrap(), r#""age" >= $1"#);
        assert_eq!(r.finish(), vec![Value::Int(21)]);
    }

    #[test]
    fn test_render_contains_postgres_casts_to_text() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let c = FilterCondition::new("1", "name", FilterOperator::NotContains).with_value("jo");
        assert_eq!(render(&mut r, c).unwrap(), r#""name"::text NOT ILIKE $1"#);
        assert_eq!(r.finish(), vec![Value::from("%jo%")]);
    }

    #[test]
    fn test_render_like_with_wildcards_adds_escape_clause() {
        let mut r = Renderer::new(&Sqlite, ParamStyle::Positional, 0);
        let c = FilterCondition::new("1", "code", FilterOperator::StartsWith).with_value("A_1");
        assert_eq!(render(&mut r, c).unwrap(), r#""code" LIKE ? ESCAPE '\'"#);
        assert_eq!(r.finish(), vec![Value::from(r"A\_1%")]);

        let mut r = Renderer::new(&MySql, ParamStyle::Positional, 0);
        let c = FilterCondition::new("1", "code", FilterOperator::EndsWith).with_value("100%");
        assert_eq!(render(&mut r, c).unwrap(), r"`code` LIKE ? ESCAPE '\\'");
        assert_eq!(r.finish(), vec![Value::from(r"%100\%")]);
    }

    #[test]
    fn test_render_like_sqlserver_brackets() {
        let mut r = Renderer::new(&SqlServer, ParamStyle::Positional, 0);
        let c = FilterCondition::new("1", "note", FilterOperator::Contains).with_value("5%");
        assert_eq!(
            render(&mut r, c).unwrap(),
            "CAST([note] AS NVARCHAR(MAX)) LIKE @p0"
        );
        assert_eq!(r.finish(), vec![Value::from("%5[%]%")]);
    }

    #[test]
    fn test_render_null_checks_consume_no_params() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let c = FilterCondition::new("1", "deleted_at", FilterOperator::IsNull);
        assert_eq!(render(&mut r, c).unwrap(), r#""deleted_at" IS NULL"#);
        let c = FilterCondition::new("2", "deleted_at", FilterOperator::IsNotNull);
        assert_eq!(render(&mut r, c).unwrap(), r#""deleted_at" IS NOT NULL"#);
        assert!(r.finish().is_empty());
    }

    #[test]
    fn test_render_in_keeps_order_and_duplicates() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let c = FilterCondition::new("1", "status", FilterOperator::In).with_value("b, a ,b,");
        assert_eq!(render(&mut r, c).unwrap(), r#""status" IN ($1, $2, $3)"#);
        assert_eq!(
            r.finish(),
            vec![Value::from("b"), Value::from("a"), Value::from("b")]
        );
    }

    #[test]
    fn test_render_in_empty_list_is_skipped() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let c = FilterCondition::new("1", "status", FilterOperator::In).with_value(" , ");
        assert_eq!(render(&mut r, c), None);
        assert!(r.finish().is_empty());
    }

    #[test]
    fn test_render_between_without_upper_bound_is_an_error() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let c = FilterCondition::new("1", "price", FilterOperator::Between).with_value(10);
        assert_eq!(
            r.render_condition(&c),
            Err(CompileError::MissingSecondValue {
                column: "price".into()
            })
        );
        assert!(r.finish().is_empty());
    }

    #[test]
    fn test_render_unknown_operator_is_skipped() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 1);
        let mut c = FilterCondition::new("1", "a", FilterOperator::Equals).with_value(1);
        c.operator = "regex".into();
        assert_eq!(render(&mut r, c), None);
    }
}
