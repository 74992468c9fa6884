use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use kosha_core::{Classifier, UserProfile};
use kosha_import::{import_path, template::template_csv, ImportContext, ImportReport};
use kosha_insight::{
    monthly_report, non_essential_limit_warning, savings_capacity, spending_mood,
    spending_trend_warnings,
};

fn import_day(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

async fn build_context(
    date: Option<NaiveDate>,
    rules: Option<&Path>,
) -> anyhow::Result<ImportContext> {
    let classifier = match rules {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading rules file {}", path.display()))?;
            Classifier::from_toml(&content)?
        }
        None => Classifier::default(),
    };
    Ok(ImportContext::with_classifier(import_day(date), classifier))
}

fn print_report(report: &ImportReport) {
    println!("{:<12} {:<14} {:<14} {:>12}  DESCRIPTION", "DATE", "CATEGORY", "KIND", "AMOUNT");
    for record in &report.records {
        println!(
            "{:<12} {:<14} {:<14} {:>12}  {}",
            record.date.to_string(),
            record.category,
            record.kind.to_string(),
            record.amount.to_string(),
            record.description
        );
    }
    println!("\n{} record(s) imported, {} row(s) skipped", report.len(), report.skipped.len());
    for skip in &report.skipped {
        tracing::warn!(row = skip.row, reason = %skip.reason, "row skipped");
    }
}

pub async fn import(
    file: &Path,
    json: bool,
    date: Option<NaiveDate>,
    rules: Option<&Path>,
) -> anyhow::Result<()> {
    let ctx = build_context(date, rules).await?;
    let report = import_path(file, &ctx)
        .await
        .with_context(|| format!("importing {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub fn template(out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, template_csv())
        .with_context(|| format!("writing template to {}", out.display()))?;
    println!("Template written to {}", out.display());
    Ok(())
}

pub async fn report(
    profile_path: &Path,
    file: &Path,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let today = import_day(date);

    let profile_toml = tokio::fs::read_to_string(profile_path)
        .await
        .with_context(|| format!("reading profile {}", profile_path.display()))?;
    let profile: UserProfile =
        toml::from_str(&profile_toml).context("parsing profile TOML")?;

    let ctx = ImportContext::new(today);
    let imported = import_path(file, &ctx)
        .await
        .with_context(|| format!("importing {}", file.display()))?;
    let expenses: Vec<_> = imported
        .records
        .into_iter()
        .map(|draft| draft.into_expense("local"))
        .collect();

    if let Some(capacity) = savings_capacity(&profile) {
        println!("Savings capacity");
        for line in &capacity.breakdown {
            println!("  {:<34} {:>12}  ({:.0}%)", line.label, line.amount.to_string(), line.percentage);
        }
        println!(
            "  Suggested savings: {} - {}\n",
            capacity.suggested_savings_min, capacity.suggested_savings_max
        );
    }

    let summary = monthly_report(&expenses, &[], &profile, today);
    println!("{} {} report", summary.month, summary.year);
    println!("  Income:   {}", summary.total_income);
    println!("  Expenses: {}", summary.total_expenses);
    println!("  Savings rate: {:.0}%", summary.savings_rate);
    println!("  Top category: {}", summary.top_expense_category);
    println!("  Score: {}/100", summary.score);
    for insight in &summary.insights {
        println!("  - {insight}");
    }
    let (_, mood_message) = spending_mood(&expenses, &profile, today);
    println!("  {mood_message}");

    let mut warnings = spending_trend_warnings(&expenses, today);
    warnings.extend(non_essential_limit_warning(&expenses, &profile, today));
    if !warnings.is_empty() {
        println!("\nWarnings");
        for warning in &warnings {
            println!("  [{:?}] {}: {}", warning.severity, warning.title, warning.message);
        }
    }

    Ok(())
}
