use crate::{error::EnumFieldError, model::ModelSchema, traits::Record};

///
/// Filter
/// Composable restriction on a collection of records.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Filter {
    Eq { field: String, value: String },
    And(Vec<Self>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Conjunction of `self` and `other`, flattening nested `And`s.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut clauses = match self {
            Self::And(clauses) => clauses,
            clause @ Self::Eq { .. } => vec![clause],
        };

        match other {
            Self::And(more) => clauses.extend(more),
            clause @ Self::Eq { .. } => clauses.push(clause),
        }

        Self::And(clauses)
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Eq { field, value } => record.field_value(field) == Some(value.as_str()),
            Self::And(clauses) => clauses.iter().all(|clause| clause.matches(record)),
        }
    }
}

///
/// Query
///
/// Collection query bound to a model schema. Scopes and filters chain; an
/// empty query matches every record.
///

#[derive(Clone, Debug)]
pub struct Query<'a> {
    schema: &'a ModelSchema,
    filters: Vec<Filter>,
}

impl<'a> Query<'a> {
    #[must_use]
    pub const fn new(schema: &'a ModelSchema) -> Self {
        Self {
            schema,
            filters: Vec::new(),
        }
    }

    /// Restrict by the named scope of the schema.
    pub fn scope(mut self, name: &str) -> Result<Self, EnumFieldError> {
        let filter = self
            .schema
            .scope(name)
            .ok_or_else(|| EnumFieldError::UnknownScope {
                path: self.schema.path().to_string(),
                name: name.to_string(),
            })?;

        self.filters.push(filter.clone());

        Ok(self)
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    pub fn apply<'r, R, I>(&self, records: I) -> Vec<&'r R>
    where
        R: Record + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .collect()
    }

    pub fn count<'r, R, I>(&self, records: I) -> usize
    where
        R: Record + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .count()
    }
}

///
/// TESTS
///
