//! Budget limit distribution model
//!
//! The budget form holds a total limit and a list of categories, each with
//! its own subcategories. Each entry can be toggled on or off and carries
//! the limit currently shown for it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::money::Money;

/// A subcategory row of the budget form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategorySelection {
    pub id: String,

    #[serde(default)]
    pub enabled: bool,

    /// Limit currently held in the form
    #[serde(default)]
    pub limit: f64,
}

impl SubCategorySelection {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            enabled,
            limit: 0.0,
        }
    }
}

/// A category row of the budget form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySelection {
    pub id: String,

    /// Display name, falls back to the id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub enabled: bool,

    /// Limit currently held in the form
    #[serde(default)]
    pub limit: f64,

    #[serde(default)]
    pub sub_categories: Vec<SubCategorySelection>,
}

impl CategorySelection {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            name: None,
            enabled,
            limit: 0.0,
            sub_categories: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sub_categories(mut self, subs: Vec<SubCategorySelection>) -> Self {
        self.sub_categories = subs;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn enabled_sub_categories(&self) -> impl Iterator<Item = &SubCategorySelection> {
        self.sub_categories.iter().filter(|s| s.enabled)
    }
}

/// A request to spread a total limit across the selected categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub total_amount: f64,

    #[serde(default)]
    pub categories: Vec<CategorySelection>,
}

impl AllocationRequest {
    pub fn new(total_amount: f64, categories: Vec<CategorySelection>) -> Self {
        Self {
            total_amount,
            categories,
        }
    }

    pub fn enabled_categories(&self) -> impl Iterator<Item = &CategorySelection> {
        self.categories.iter().filter(|c| c.enabled)
    }

    /// The part of the total not yet assigned to an enabled category
    pub fn remaining(&self) -> f64 {
        let assigned: f64 = self.enabled_categories().map(|c| c.limit).sum();
        self.total_amount - assigned
    }

    /// Checks done on the form state before distributing
    ///
    /// An empty selection is not a validation failure here; the allocator
    /// reports it separately so the form can prompt for a selection.
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        if !self.total_amount.is_finite() {
            return Err(AllocationValidationError::NonFiniteTotal);
        }

        if self.total_amount < 0.0 {
            return Err(AllocationValidationError::NegativeTotal);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(AllocationValidationError::DuplicateCategory(
                    category.id.clone(),
                ));
            }

            let mut seen_subs = HashSet::new();
            for sub in &category.sub_categories {
                if !seen_subs.insert(sub.id.as_str()) {
                    return Err(AllocationValidationError::DuplicateSubCategory(
                        sub.id.clone(),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryAllocation {
    pub id: String,
    pub allocated_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAllocation {
    pub id: String,
    pub allocated_amount: f64,
    pub sub_categories: Vec<SubCategoryAllocation>,
}

/// Per-category and per-subcategory shares of a distributed limit
///
/// Holds one entry for every category and subcategory of the request, in
/// request order; entries that were not enabled carry zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub total_amount: f64,
    pub categories: Vec<CategoryAllocation>,
}

impl AllocationResult {
    pub fn total_allocated(&self) -> f64 {
        self.categories.iter().map(|c| c.allocated_amount).sum()
    }

    pub fn category(&self, id: &str) -> Option<&CategoryAllocation> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Write the computed shares back into the form state
    ///
    /// Every limit of a matching category or subcategory is overwritten,
    /// including the zeroes of entries that are not enabled.
    pub fn apply_to(&self, request: &mut AllocationRequest) {
        for category in &mut request.categories {
            let Some(allocation) = self.category(&category.id) else {
                continue;
            };
            category.limit = allocation.allocated_amount;

            for sub in &mut category.sub_categories {
                if let Some(sub_alloc) = allocation.sub_categories.iter().find(|s| s.id == sub.id) {
                    sub.limit = sub_alloc.allocated_amount;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryCentShare {
    pub id: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCentShare {
    pub id: String,
    pub amount: Money,
    pub sub_categories: Vec<SubCategoryCentShare>,
}

/// A distribution in whole cents whose shares add up to the total exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentAllocation {
    pub total_amount: Money,
    pub categories: Vec<CategoryCentShare>,
}

impl CentAllocation {
    pub fn total_allocated(&self) -> Money {
        self.categories.iter().map(|c| c.amount).sum()
    }

    /// The same shares expressed as decimal amounts
    pub fn to_decimal(&self) -> AllocationResult {
        AllocationResult {
            total_amount: self.total_amount.to_decimal(),
            categories: self
                .categories
                .iter()
                .map(|c| CategoryAllocation {
                    id: c.id.clone(),
                    allocated_amount: c.amount.to_decimal(),
                    sub_categories: c
                        .sub_categories
                        .iter()
                        .map(|s| SubCategoryAllocation {
                            id: s.id.clone(),
                            allocated_amount: s.amount.to_decimal(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationValidationError {
    NegativeTotal,
    NonFiniteTotal,
    DuplicateCategory(String),
    DuplicateSubCategory(String),
}

impl fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTotal => write!(f, "Total limit cannot be negative"),
            Self::NonFiniteTotal => write!(f, "Total limit must be a finite number"),
            Self::DuplicateCategory(id) => write!(f, "Category listed twice: {}", id),
            Self::DuplicateSubCategory(id) => write!(f, "Subcategory listed twice: {}", id),
        }
    }
}

impl std::error::Error for AllocationValidationError {}
