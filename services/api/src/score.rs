use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{score_breakdown, Receipt, ScoreBreakdown};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    #[arg(long)]
    pub(crate) receipt: PathBuf,
    /// Print the breakdown as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    retailer: &'a str,
    #[serde(flatten)]
    breakdown: &'a ScoreBreakdown,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.receipt)?;
    let receipt: Receipt = serde_json::from_str(&raw)?;
    let breakdown = score_breakdown(&receipt)?;

    if args.json {
        let report = ScoreReport {
            retailer: &receipt.retailer,
            breakdown: &breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_breakdown(&receipt, &breakdown));
    }

    Ok(())
}

fn render_breakdown(receipt: &Receipt, breakdown: &ScoreBreakdown) -> String {
    let mut out = format!(
        "Receipt from {} on {} at {}\n",
        receipt.retailer, receipt.purchase_date, receipt.purchase_time
    );

    if breakdown.components.is_empty() {
        out.push_str("No rules awarded points\n");
    } else {
        for component in &breakdown.components {
            out.push_str(&format!(
                "- {}: +{} ({})\n",
                component.rule.label(),
                component.points,
                component.notes
            ));
        }
    }

    out.push_str(&format!("Total: {} points\n", breakdown.total));
    out
}
