use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A customer enrolled in the loyalty programme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier for the `Customer`
    ///
    /// This is also used by other services.
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    /// Lifetime number of accrued loyalty points
    ///
    /// This only ever grows: points are accrued when orders are created and
    /// never removed (redemption is handled elsewhere).
    pub points_balance: u32,
}

/// A purchase made by a customer.
///
/// Orders are immutable once created. In particular `earned_points` is
/// computed exactly once, when the order is recorded, and never recomputed
/// even if the tier configuration changes later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    /// Total purchase amount in the store currency
    pub amount: Decimal,
    /// Loyalty points awarded for this purchase
    pub earned_points: u32,
    /// Calendar date of the purchase, no time component
    pub order_date: NaiveDate,
}

impl Order {
    pub fn new(customer_id: Uuid, amount: Decimal, earned_points: u32, order_date: NaiveDate) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            customer_id,
            amount,
            earned_points,
            order_date,
        }
    }
}

/// Spend multipliers for the two point-earning tiers.
///
/// Spend between 50 and 100 earns `over_fifty_multiplier` points per currency
/// unit; spend above 100 earns `over_hundred_multiplier` points per currency
/// unit on top. Multipliers are tunable per deployment, so they are read from
/// the environment rather than hardcoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierConfig {
    pub over_fifty_multiplier: u32,
    pub over_hundred_multiplier: u32,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            over_fifty_multiplier: 1,
            over_hundred_multiplier: 2,
        }
    }
}

const OVER_FIFTY_VAR: &str = "LOYALTY_SPEND_MULTIPLIER_OVER_FIFTY";
const OVER_HUNDRED_VAR: &str = "LOYALTY_SPEND_MULTIPLIER_OVER_HUNDRED";

#[derive(Debug, thiserror::Error)]
#[error("invalid tier multiplier in {var}: {value:?}")]
pub struct TierConfigError {
    pub var: &'static str,
    pub value: String,
}

impl TierConfig {
    /// Reads the multipliers from the environment, falling back to the
    /// defaults for any variable that is not set.
    pub fn from_env() -> Result<Self, TierConfigError> {
        let defaults = Self::default();
        Ok(Self {
            over_fifty_multiplier: read_multiplier(OVER_FIFTY_VAR, defaults.over_fifty_multiplier)?,
            over_hundred_multiplier: read_multiplier(OVER_HUNDRED_VAR, defaults.over_hundred_multiplier)?,
        })
    }

    /// Loyalty points earned for a purchase of `amount`.
    ///
    /// Two independent tiers, summed:
    /// * over-50: every currency unit spent between 50 and 100, times
    ///   `over_fifty_multiplier`. Capped at a 50-unit span.
    /// * over-100: every currency unit spent above 100, times
    ///   `over_hundred_multiplier`. Uncapped.
    ///
    /// Each tier is truncated toward zero after applying its multiplier, not
    /// before. An amount of 50.58 therefore earns nothing (0.58 truncates to
    /// 0) while 75.50 with multiplier 1 earns 25.
    ///
    /// The caller is responsible for rejecting negative amounts.
    pub fn points_for(&self, amount: Decimal) -> u32 {
        let fifty = Decimal::from(50u32);
        let hundred = Decimal::from(100u32);

        let over_fifty =
            (amount - fifty).max(Decimal::ZERO).min(fifty) * Decimal::from(self.over_fifty_multiplier);
        let over_hundred =
            (amount - hundred).max(Decimal::ZERO) * Decimal::from(self.over_hundred_multiplier);

        // Saturate rather than wrap if a tier product exceeds u32.
        let over_fifty = over_fifty.trunc().to_u32().unwrap_or(u32::MAX);
        let over_hundred = over_hundred.trunc().to_u32().unwrap_or(u32::MAX);
        over_fifty.saturating_add(over_hundred)
    }
}

fn read_multiplier(var: &'static str, default: u32) -> Result<u32, TierConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| TierConfigError { var, value }),
        Err(_) => Ok(default),
    }
}

/// Points earned by one customer during one calendar month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub points: u64,
}

/// Groups the points earned by `orders` into calendar-month buckets.
///
/// Orders dated outside `start..=end` are skipped; both bounds are inclusive.
/// Months in which no order falls are omitted rather than zero-filled. The
/// buckets come out in chronological order, so the result is reproducible for
/// a given input regardless of the order of `orders`.
pub fn monthly_points(orders: &[Order], start: NaiveDate, end: NaiveDate) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for order in orders {
        if order.order_date < start || order.order_date > end {
            continue;
        }
        *buckets
            .entry((order.order_date.year(), order.order_date.month()))
            .or_default() += u64::from(order.earned_points);
    }

    buckets
        .into_iter()
        .map(|((year, month), points)| MonthlyBucket { year, month, points })
        .collect()
}

/// Loyalty report for one customer over a date window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoyaltySummary {
    pub customer: Customer,
    /// Per-month breakdown of points earned within the requested window
    pub monthly_points: Vec<MonthlyBucket>,
    /// Lifetime balance, independent of the requested window
    pub total_points: u32,
}

impl LoyaltySummary {
    /// Assembles the summary for `customer` from its orders.
    ///
    /// `total_points` is the customer's current lifetime balance, not the sum
    /// of the window's buckets: the window only restricts the monthly
    /// breakdown.
    pub fn build(customer: Customer, orders: &[Order], start: NaiveDate, end: NaiveDate) -> Self {
        let monthly_points = monthly_points(orders, start, end);
        let total_points = customer.points_balance;
        Self {
            customer,
            monthly_points,
            total_points,
        }
    }
}
