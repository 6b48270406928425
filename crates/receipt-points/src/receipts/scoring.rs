use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Item, Points, Receipt};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;
const AFTERNOON_FIRST_HOUR: i64 = 14;
const AFTERNOON_LAST_HOUR: i64 = 16;
const DESCRIPTION_LENGTH_DIVISOR: usize = 3;

/// Raised when any amount, date, or time on a receipt cannot be parsed. The failing field is
/// not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "Error encountered during processing of receipt data. Receipt not stored. \
     Expected a parseable number, time, or date."
)]
pub struct InvalidReceipt;

/// The fixed business rules that award points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerAlphanumerics,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerAlphanumerics => "Retailer alphanumerics",
            ScoringRule::RoundDollarTotal => "Round dollar total",
            ScoringRule::QuarterMultipleTotal => "Quarter multiple total",
            ScoringRule::ItemPairs => "Item pairs",
            ScoringRule::ItemDescriptionLength => "Item description length",
            ScoringRule::OddPurchaseDay => "Odd purchase day",
            ScoringRule::AfternoonPurchase => "Afternoon purchase",
        }
    }
}

/// Points awarded by a single rule, kept for audits and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

/// Awarded rule components and their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub total: Points,
}

impl ScoreBreakdown {
    fn award(
        &mut self,
        rule: ScoringRule,
        points: u64,
        notes: String,
    ) -> Result<(), InvalidReceipt> {
        let total = self.total.0.checked_add(points).ok_or(InvalidReceipt)?;
        self.total = Points(total);
        self.components.push(ScoreComponent {
            rule,
            points,
            notes,
        });
        Ok(())
    }

    /// Sum of the points a rule contributed; zero when the rule did not fire.
    pub fn points_for(&self, rule: ScoringRule) -> u64 {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .sum()
    }
}

/// Score a receipt. Pure and deterministic; malformed input yields `InvalidReceipt`.
pub fn score(receipt: &Receipt) -> Result<Points, InvalidReceipt> {
    score_breakdown(receipt).map(|breakdown| breakdown.total)
}

/// Score a receipt and keep the per-rule contributions.
pub fn score_breakdown(receipt: &Receipt) -> Result<ScoreBreakdown, InvalidReceipt> {
    let mut breakdown = ScoreBreakdown::default();

    let alphanumerics = retailer_points(&receipt.retailer);
    if alphanumerics > 0 {
        breakdown.award(
            ScoringRule::RetailerAlphanumerics,
            alphanumerics,
            format!("{alphanumerics} alphanumeric characters in '{}'", receipt.retailer),
        )?;
    }

    let total = parse_amount(&receipt.total)?;
    if total.fract().is_zero() {
        breakdown.award(
            ScoringRule::RoundDollarTotal,
            ROUND_DOLLAR_POINTS,
            format!("total {total} has no cents"),
        )?;
    }

    let quarter = Decimal::new(25, 2);
    let remainder = total.checked_rem(quarter).ok_or(InvalidReceipt)?;
    if remainder.is_zero() {
        breakdown.award(
            ScoringRule::QuarterMultipleTotal,
            QUARTER_MULTIPLE_POINTS,
            format!("total {total} is a multiple of 0.25"),
        )?;
    }

    let pairs = (receipt.items.len() / 2) as u64;
    if pairs > 0 {
        breakdown.award(
            ScoringRule::ItemPairs,
            pairs.saturating_mul(ITEM_PAIR_POINTS),
            format!("{pairs} pair(s) of items"),
        )?;
    }

    for item in &receipt.items {
        if let Some(points) = description_points(item)? {
            breakdown.award(
                ScoringRule::ItemDescriptionLength,
                points,
                format!(
                    "'{}' trims to a multiple of 3 characters, price {}",
                    item.short_description.trim(),
                    item.price
                ),
            )?;
        }
    }

    let day = purchase_day(&receipt.purchase_date)?;
    if day % 2 != 0 {
        breakdown.award(
            ScoringRule::OddPurchaseDay,
            ODD_DAY_POINTS,
            format!("purchase day {day} is odd"),
        )?;
    }

    let hour = purchase_hour(&receipt.purchase_time)?;
    if (AFTERNOON_FIRST_HOUR..=AFTERNOON_LAST_HOUR).contains(&hour) {
        breakdown.award(
            ScoringRule::AfternoonPurchase,
            AFTERNOON_POINTS,
            format!("purchased during hour {hour}"),
        )?;
    }

    Ok(breakdown)
}

fn retailer_points(retailer: &str) -> u64 {
    retailer
        .bytes()
        .filter(|byte| byte.is_ascii_alphanumeric())
        .count() as u64
}

// Plain fixed-point text only: optional sign, digits, at most one point. Values that would lose
// precision are rejected rather than rounded.
fn parse_amount(raw: &str) -> Result<Decimal, InvalidReceipt> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let plain = unsigned.bytes().any(|byte| byte.is_ascii_digit())
        && unsigned
            .bytes()
            .all(|byte| byte.is_ascii_digit() || byte == b'.')
        && unsigned.bytes().filter(|byte| *byte == b'.').count() <= 1;
    if !plain {
        return Err(InvalidReceipt);
    }
    let amount = Decimal::from_str_exact(unsigned).map_err(|_| InvalidReceipt)?;
    Ok(if negative { -amount } else { amount })
}

// An all-whitespace description trims to length 0 and still qualifies. A negative price
// contributes nothing, so points never drop below zero.
fn description_points(item: &Item) -> Result<Option<u64>, InvalidReceipt> {
    let trimmed = item.short_description.trim();
    if trimmed.len() % DESCRIPTION_LENGTH_DIVISOR != 0 {
        return Ok(None);
    }

    let price = parse_amount(&item.price)?;
    let scaled = price
        .checked_mul(Decimal::new(2, 1))
        .ok_or(InvalidReceipt)?
        .ceil();
    if scaled <= Decimal::ZERO {
        return Ok(Some(0));
    }
    let points = scaled.to_u64().ok_or(InvalidReceipt)?;
    Ok(Some(points))
}

fn purchase_day(raw: &str) -> Result<i64, InvalidReceipt> {
    let components: Vec<&str> = raw.split('-').collect();
    let [_year, _month, day] = components.as_slice() else {
        return Err(InvalidReceipt);
    };
    day.parse::<i64>().map_err(|_| InvalidReceipt)
}

fn purchase_hour(raw: &str) -> Result<i64, InvalidReceipt> {
    let components: Vec<&str> = raw.split(':').collect();
    let [hour, _minute] = components.as_slice() else {
        return Err(InvalidReceipt);
    };
    hour.parse::<i64>().map_err(|_| InvalidReceipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, price: &str) -> Item {
        Item {
            short_description: description.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn retailer_points_skip_punctuation_and_spaces() {
        assert_eq!(retailer_points("Target"), 6);
        assert_eq!(retailer_points("M&M Corner Market"), 14);
        assert_eq!(retailer_points("  7-Eleven #42 "), 9);
        assert_eq!(retailer_points("Café"), 3);
    }

    #[test]
    fn parse_amount_accepts_signed_fixed_point_text() {
        assert_eq!(parse_amount("35.35"), Ok(Decimal::new(3535, 2)));
        assert_eq!(parse_amount("-1.00"), Ok(Decimal::new(-100, 2)));
        assert_eq!(parse_amount("+2.5"), Ok(Decimal::new(25, 1)));
    }

    #[test]
    fn parse_amount_rejects_non_plain_text() {
        for raw in ["", "-", ".", "12,50", "1_000", "1e3", " 1.00", "NaN", "inf"] {
            assert_eq!(parse_amount(raw), Err(InvalidReceipt), "{raw:?}");
        }
    }

    #[test]
    fn parse_amount_rejects_precision_loss() {
        assert_eq!(
            parse_amount("0.0000000000000000000000000000001"),
            Err(InvalidReceipt)
        );
    }

    #[test]
    fn negative_qualifying_price_contributes_nothing() {
        assert_eq!(description_points(&item("Dasani", "-12.25")), Ok(Some(0)));
        assert_eq!(description_points(&item("Dasani", "-0.01")), Ok(Some(0)));
    }

    #[test]
    fn description_points_round_up() {
        assert_eq!(description_points(&item("Dasani", "12.25")), Ok(Some(3)));
        assert_eq!(description_points(&item("Emils Cheese Pizza", "12.25")), Ok(Some(3)));
        assert_eq!(description_points(&item("abc", "5.00")), Ok(Some(1)));
        assert_eq!(description_points(&item("abc", "0")), Ok(Some(0)));
    }

    #[test]
    fn description_points_only_parse_qualifying_prices() {
        assert_eq!(description_points(&item("Pepsi - 12-oz", "oops")), Ok(None));
        assert_eq!(description_points(&item("Dasani", "oops")), Err(InvalidReceipt));
    }

    #[test]
    fn blank_description_counts_as_multiple_of_three() {
        assert_eq!(description_points(&item("    ", "10.00")), Ok(Some(2)));
        assert_eq!(description_points(&item("", "bad")), Err(InvalidReceipt));
    }

    #[test]
    fn purchase_day_requires_three_components() {
        assert_eq!(purchase_day("2022-01-01"), Ok(1));
        assert_eq!(purchase_day("2022-01"), Err(InvalidReceipt));
        assert_eq!(purchase_day("2022-1-"), Err(InvalidReceipt));
        assert_eq!(purchase_day("2022-01-01-01"), Err(InvalidReceipt));
        assert_eq!(purchase_day("2022/01/01"), Err(InvalidReceipt));
    }

    #[test]
    fn purchase_hour_requires_two_components() {
        assert_eq!(purchase_hour("16:59"), Ok(16));
        assert_eq!(purchase_hour("14"), Err(InvalidReceipt));
        assert_eq!(purchase_hour("14:00:00"), Err(InvalidReceipt));
        assert_eq!(purchase_hour("2pm:00"), Err(InvalidReceipt));
    }
}
