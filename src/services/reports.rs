use crate::{
    db::DbPool,
    entities::{sales_transaction, transaction_detail},
    errors::ServiceError,
};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BestSellingProduct {
    /// Product name as captured at time of sale; empty when no sales matched
    pub name: String,
    pub quantity_sold: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    pub total_revenue: i64,
    pub total_transaction_count: u64,
    pub best_selling_product: BestSellingProduct,
}

/// Aggregates committed sales into summary figures over a date range.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Summarizes sales between `start_date` and `end_date` (both inclusive,
    /// interpreted as local calendar days). With neither bound given, the
    /// report covers the current local day; with one bound given, the other
    /// side is unbounded.
    #[instrument(skip(self))]
    pub async fn get_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ReportSummary, ServiceError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(ServiceError::ValidationError(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
        }

        let today = Local::now().date_naive();
        let (lower, upper) = resolve_range(start_date, end_date, today);

        let mut query = sales_transaction::Entity::find();
        if let Some(lower) = lower {
            query = query.filter(sales_transaction::Column::CreatedAt.gte(day_start_utc(lower)));
        }
        if let Some(upper) = upper {
            query = query.filter(sales_transaction::Column::CreatedAt.lt(day_start_utc(upper)));
        }

        let transactions = query
            .find_with_related(transaction_detail::Entity)
            .all(&*self.db_pool)
            .await?;

        let total_transaction_count = transactions.len() as u64;
        let total_revenue: i64 = transactions.iter().map(|(t, _)| t.total_amount).sum();

        // Quantities sold per product across all matched transactions, keyed
        // by product id so renames between sales do not split the tally.
        let mut sold: HashMap<i32, (String, i64)> = HashMap::new();
        for (_, details) in &transactions {
            for detail in details {
                let entry = sold
                    .entry(detail.product_id)
                    .or_insert_with(|| (detail.product_name.clone(), 0));
                entry.1 += i64::from(detail.quantity);
            }
        }

        let best_selling_product = pick_best_seller(sold);

        Ok(ReportSummary {
            total_revenue,
            total_transaction_count,
            best_selling_product,
        })
    }
}

/// Resolves the requested bounds into an inclusive lower / exclusive upper
/// pair of calendar days. `None` on a side means unbounded.
fn resolve_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let exclusive_end = |d: NaiveDate| d.succ_opt().unwrap_or(NaiveDate::MAX);

    match (start_date, end_date) {
        (None, None) => (Some(today), Some(exclusive_end(today))),
        (Some(start), None) => (Some(start), None),
        (None, Some(end)) => (None, Some(exclusive_end(end))),
        (Some(start), Some(end)) => (Some(start), Some(exclusive_end(end))),
    }
}

/// Local midnight of the given day, expressed in UTC for comparison against
/// stored timestamps.
fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // DST gap at midnight; treat the naive time as UTC rather than fail.
        None => Utc.from_utc_datetime(&midnight),
    }
}

/// Highest quantity wins; ties break toward the lowest product id so the
/// result is stable across runs. Empty input yields an empty name and zero.
fn pick_best_seller(sold: HashMap<i32, (String, i64)>) -> BestSellingProduct {
    let mut best: Option<(i32, String, i64)> = None;

    for (product_id, (name, quantity)) in sold {
        let replace = match &best {
            None => true,
            Some((best_id, _, best_qty)) => {
                quantity > *best_qty || (quantity == *best_qty && product_id < *best_id)
            }
        };
        if replace {
            best = Some((product_id, name, quantity));
        }
    }

    match best {
        Some((_, name, quantity_sold)) => BestSellingProduct {
            name,
            quantity_sold,
        },
        None => BestSellingProduct {
            name: String::new(),
            quantity_sold: 0,
        },
    }
}
