use serde::{Deserialize, Serialize};

/// Metadata field a filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Vendor,
    Product,
    ContentType,
    SourceId,
    Date,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Vendor => "vendor",
            FilterField::Product => "product",
            FilterField::ContentType => "type",
            FilterField::SourceId => "source_id",
            FilterField::Date => "date",
        }
    }
}

/// Tagged filter constraint, translated per backend at the store adapter
/// boundary. A backend that cannot express `Contains` downgrades it to
/// `Equals` rather than failing the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    Equals { field: FilterField, value: String },
    Contains { field: FilterField, value: String },
    Range { field: FilterField, low: String, high: String },
}

impl Filter {
    pub fn field(&self) -> FilterField {
        match self {
            Filter::Equals { field, .. }
            | Filter::Contains { field, .. }
            | Filter::Range { field, .. } => *field,
        }
    }
}

/// Conjunction of filter constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// Structured filters extracted from a free-text query. Absence of a match
/// leaves a field empty; extraction never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilters {
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub content_type: Option<String>,
    /// Time window in days ("past week" → 7, "recent" → 30).
    pub day_span: Option<u32>,
}

impl QueryFilters {
    /// Whether any graph-level filter (time window, vendor, product) is
    /// present. This is the precondition for the graph fallback path.
    pub fn has_graph_filters(&self) -> bool {
        self.vendor.is_some() || self.product.is_some() || self.day_span.is_some()
    }

    /// Metadata filters for the vector store: vendor is an exact match,
    /// product and content-type are containment matches.
    pub fn to_store_filters(&self) -> FilterSet {
        let mut set = FilterSet::new();
        if let Some(vendor) = &self.vendor {
            set.push(Filter::Equals {
                field: FilterField::Vendor,
                value: vendor.clone(),
            });
        }
        if let Some(product) = &self.product {
            set.push(Filter::Contains {
                field: FilterField::Product,
                value: product.clone(),
            });
        }
        if let Some(content_type) = &self.content_type {
            set.push(Filter::Contains {
                field: FilterField::ContentType,
                value: content_type.clone(),
            });
        }
        set
    }
}
