//! Product entity and wire schemas.
//!
//! Input schemas are deliberately loose (`DecimalText` keeps the raw price
//! text) so that the explicit `build`/`into_changes`/`into_range` functions
//! can report every bad field at once as [`ValidationErrors`].

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A stored product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Validate `input` and assign a fresh id and timestamps.
    pub fn build(input: ProductIn, now: DateTime<Utc>) -> Result<Self, ValidationErrors> {
        let price = parse_decimal("price", &input.price).map_err(ValidationErrors::single)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: input.name,
            quantity: input.quantity,
            price,
            status: input.status,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Decimal as sent by clients: a JSON string (`"8500.00"`) or number (`8.5`).
///
/// Parsing is deferred so the raw text can be echoed back in validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(from = "RawDecimal")]
#[schema(value_type = String, example = "8500.00")]
pub struct DecimalText(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawDecimal> for DecimalText {
    fn from(raw: RawDecimal) -> Self {
        match raw {
            RawDecimal::Text(text) => Self(text),
            RawDecimal::Number(number) => Self(number.to_string()),
        }
    }
}

impl DecimalText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DecimalText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Parse decimal text, accepting plain (`"7.500"`) and scientific (`"7.5e0"`) forms.
pub fn parse_decimal(field: &str, text: &DecimalText) -> Result<Decimal, FieldError> {
    let trimmed = text.as_str().trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| FieldError::decimal_parsing(field, text.as_str()))
}

/// Create payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductIn {
    /// Product name
    #[schema(example = "Iphone 14 Pro Max")]
    pub name: String,
    /// Product quantity
    #[schema(example = 18)]
    pub quantity: i64,
    /// Product price
    pub price: DecimalText,
    /// Product status
    #[schema(example = true)]
    pub status: bool,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductOut {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    #[schema(value_type = String, example = "8500.00")]
    pub price: Decimal,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type ProductUpdateOut = ProductOut;

impl From<Product> for ProductOut {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductUpdate {
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<DecimalText>,
    #[serde(default)]
    pub status: Option<bool>,
    /// Defaults to the time of the update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductUpdate {
    pub fn into_changes(self, now: DateTime<Utc>) -> Result<ProductChanges, ValidationErrors> {
        let price = self
            .price
            .as_ref()
            .map(|text| parse_decimal("price", text))
            .transpose()
            .map_err(ValidationErrors::single)?;

        Ok(ProductChanges {
            quantity: self.quantity,
            price,
            status: self.status,
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// Validated partial update. Only the `Some` fields are written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub status: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl ProductChanges {
    pub fn apply(&self, product: &mut Product) {
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        product.updated_at = self.updated_at;
    }
}

/// Price filter payload
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilterIn {
    /// Exclusive lower bound
    #[serde(default)]
    #[param(value_type = Option<String>, example = "4.500")]
    pub min_price: Option<DecimalText>,
    /// Exclusive upper bound
    #[serde(default)]
    #[param(value_type = Option<String>, example = "8.000")]
    pub max_price: Option<DecimalText>,
}

impl ProductFilterIn {
    pub fn into_range(self) -> Result<PriceRange, ValidationErrors> {
        let min = self.min_price.as_ref().map(|t| parse_decimal("min_price", t));
        let max = self.max_price.as_ref().map(|t| parse_decimal("max_price", t));

        let mut errors = Vec::new();
        let min = min.transpose().unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        let max = max.transpose().unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        if errors.is_empty() {
            Ok(PriceRange { min, max })
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Open price interval; a missing bound leaves that side unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn contains(&self, price: &Decimal) -> bool {
        self.min.map_or(true, |min| *price > min) && self.max.map_or(true, |max| *price < max)
    }
}

/// One failed field: where, what kind, a message, and the offending input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Value,
}

impl FieldError {
    pub fn decimal_parsing(field: &str, input: &str) -> Self {
        Self {
            kind: "decimal_parsing".to_string(),
            loc: vec![field.to_string()],
            msg: "Input should be a valid decimal".to_string(),
            input: Value::String(input.to_string()),
        }
    }

    /// `updated_at` earlier than the record's `created_at`
    pub fn updated_before_created(updated_at: DateTime<Utc>) -> Self {
        Self {
            kind: "value_error".to_string(),
            loc: vec!["updated_at".to_string()],
            msg: "Value should not be earlier than created_at".to_string(),
            input: Value::String(updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

/// Renders as a compact JSON array.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for ValidationErrors {}
