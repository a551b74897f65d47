//! Distribution display formatting
//!
//! Shows each category share followed by its subcategory shares, in request
//! order, with amounts rounded to cents for display.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::{TallyError, TallyResult};
use crate::models::{AllocationRequest, AllocationResult, CurrencyLocale, Money};

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subcategory")]
    sub_category: String,
    #[tabled(rename = "On")]
    enabled: &'static str,
    #[tabled(rename = "Limit")]
    amount: String,
}

#[derive(Serialize)]
struct AllocationCsvRow<'a> {
    category_id: &'a str,
    sub_category_id: &'a str,
    enabled: bool,
    allocated_amount: f64,
}

/// Amounts past the cent range fall back to a plain two-decimal rendering
fn display_amount(amount: f64, locale: &CurrencyLocale) -> String {
    match Money::try_from_decimal(amount) {
        Some(money) => money.format(locale),
        None => format!("{:.2}", amount),
    }
}

fn check(enabled: bool) -> &'static str {
    if enabled {
        "x"
    } else {
        ""
    }
}

/// Table of the distribution, with a trailing total line
pub fn format_allocation_table(
    request: &AllocationRequest,
    result: &AllocationResult,
    locale: &CurrencyLocale,
) -> String {
    let mut rows = Vec::new();

    for (category, allocation) in request.categories.iter().zip(&result.categories) {
        rows.push(AllocationRow {
            category: category.display_name().to_string(),
            sub_category: String::new(),
            enabled: check(category.enabled),
            amount: display_amount(allocation.allocated_amount, locale),
        });

        for (sub, sub_alloc) in category.sub_categories.iter().zip(&allocation.sub_categories) {
            rows.push(AllocationRow {
                category: String::new(),
                sub_category: sub.id.clone(),
                enabled: check(category.enabled && sub.enabled),
                amount: display_amount(sub_alloc.allocated_amount, locale),
            });
        }
    }

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push_str(&format!(
        "\nTotal: {}  Distributed: {}\n",
        display_amount(result.total_amount, locale),
        display_amount(result.total_allocated(), locale)
    ));
    output
}

/// CSV with one line per category and per subcategory
pub fn allocation_csv(request: &AllocationRequest, result: &AllocationResult) -> TallyResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (category, allocation) in request.categories.iter().zip(&result.categories) {
        writer
            .serialize(AllocationCsvRow {
                category_id: &category.id,
                sub_category_id: "",
                enabled: category.enabled,
                allocated_amount: allocation.allocated_amount,
            })
            .map_err(|e| TallyError::Export(e.to_string()))?;

        for (sub, sub_alloc) in category.sub_categories.iter().zip(&allocation.sub_categories) {
            writer
                .serialize(AllocationCsvRow {
                    category_id: &category.id,
                    sub_category_id: &sub.id,
                    enabled: category.enabled && sub.enabled,
                    allocated_amount: sub_alloc.allocated_amount,
                })
                .map_err(|e| TallyError::Export(e.to_string()))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TallyError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TallyError::Export(e.to_string()))
}
