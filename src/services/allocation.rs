//! Allocation service
//!
//! Spreads a budget's total limit evenly across the enabled categories, and
//! each category's share evenly across its enabled subcategories.

use tracing::{debug, warn};

use crate::config::settings::{AllocationMode, Settings};
use crate::error::{TallyError, TallyResult};
use crate::models::{
    AllocationRequest, AllocationResult, CategoryAllocation, CategoryCentShare, CentAllocation,
    Money, SubCategoryAllocation, SubCategoryCentShare,
};

/// Split the total evenly across enabled categories and subcategories
///
/// Plain floating-point division: the shares add up to the total only up to
/// rounding error. Categories and subcategories that are not enabled get
/// zero. An enabled category without enabled subcategories keeps its share
/// at category level and all of its subcategories get zero.
pub fn allocate_evenly(request: &AllocationRequest) -> TallyResult<AllocationResult> {
    let enabled = request.enabled_categories().count();
    if enabled == 0 {
        warn!(
            categories = request.categories.len(),
            "distribution requested without an enabled category"
        );
        return Err(TallyError::NoSelection);
    }

    let per_category = request.total_amount / enabled as f64;

    let categories = request
        .categories
        .iter()
        .map(|category| {
            let allocated_amount = if category.enabled { per_category } else { 0.0 };
            let enabled_subs = category.enabled_sub_categories().count();
            let per_sub = if category.enabled && enabled_subs > 0 {
                per_category / enabled_subs as f64
            } else {
                0.0
            };

            CategoryAllocation {
                id: category.id.clone(),
                allocated_amount,
                sub_categories: category
                    .sub_categories
                    .iter()
                    .map(|sub| SubCategoryAllocation {
                        id: sub.id.clone(),
                        allocated_amount: if sub.enabled { per_sub } else { 0.0 },
                    })
                    .collect(),
            }
        })
        .collect();

    debug!(
        total = request.total_amount,
        enabled, per_category, "distributed limit evenly"
    );

    Ok(AllocationResult {
        total_amount: request.total_amount,
        categories,
    })
}

/// Split the total in whole cents so the shares add up exactly
///
/// Each level divides its amount evenly and hands the leftover cents out one
/// at a time to the first enabled entries, in request order. The request's
/// own `total_amount` is ignored in favor of `total`.
pub fn allocate_evenly_cents(
    total: Money,
    request: &AllocationRequest,
) -> TallyResult<CentAllocation> {
    if total.is_negative() {
        return Err(TallyError::Validation(
            "Total limit cannot be negative".into(),
        ));
    }

    let enabled = request.enabled_categories().count();
    if enabled == 0 {
        warn!(
            categories = request.categories.len(),
            "distribution requested without an enabled category"
        );
        return Err(TallyError::NoSelection);
    }

    let mut category_shares = split_cents(total.cents(), enabled).into_iter();

    let categories = request
        .categories
        .iter()
        .map(|category| {
            let amount = if category.enabled {
                category_shares.next().unwrap_or(0)
            } else {
                0
            };

            let enabled_subs = category.enabled_sub_categories().count();
            let mut sub_shares = if category.enabled && enabled_subs > 0 {
                split_cents(amount, enabled_subs)
            } else {
                Vec::new()
            }
            .into_iter();

            CategoryCentShare {
                id: category.id.clone(),
                amount: Money::from_cents(amount),
                sub_categories: category
                    .sub_categories
                    .iter()
                    .map(|sub| SubCategoryCentShare {
                        id: sub.id.clone(),
                        amount: Money::from_cents(if sub.enabled {
                            sub_shares.next().unwrap_or(0)
                        } else {
                            0
                        }),
                    })
                    .collect(),
            }
        })
        .collect();

    debug!(total = %total, enabled, "distributed limit in whole cents");

    Ok(CentAllocation {
        total_amount: total,
        categories,
    })
}

/// Divide `cents` into `parts` shares differing by at most one cent, larger first
fn split_cents(cents: i64, parts: usize) -> Vec<i64> {
    let parts_i = parts as i64;
    let base = cents / parts_i;
    let remainder = cents % parts_i;

    (0..parts_i)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Service that distributes limits according to user preferences
pub struct AllocationService<'a> {
    settings: &'a Settings,
}

impl<'a> AllocationService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Validate the request and distribute it with the configured mode
    pub fn distribute(&self, request: &AllocationRequest) -> TallyResult<AllocationResult> {
        self.distribute_with(request, self.settings.allocation_mode)
    }

    pub fn distribute_with(
        &self,
        request: &AllocationRequest,
        mode: AllocationMode,
    ) -> TallyResult<AllocationResult> {
        request
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        match mode {
            AllocationMode::Even => allocate_evenly(request),
            AllocationMode::CentExact => {
                let total = Money::try_from_decimal(request.total_amount).ok_or_else(|| {
                    TallyError::Validation(format!(
                        "Total limit {} is too large to split in cents",
                        request.total_amount
                    ))
                })?;
                allocate_evenly_cents(total, request).map(|cents| cents.to_decimal())
            }
        }
    }

    /// Distribute and write the shares back into the form state
    pub fn distribute_into(&self, request: &mut AllocationRequest) -> TallyResult<AllocationResult> {
        let result = self.distribute(request)?;
        result.apply_to(request);
        Ok(result)
    }
}
