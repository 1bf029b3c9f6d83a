//! Chart generation for the exploratory dashboard.
//!
//! Builds six ECharts visualizations from the aggregate views:
//! - **Category Bar**: total expenses per category
//! - **Category Pie**: expense distribution across categories
//! - **Monthly Line**: income vs expense vs savings per month
//! - **Weekly Line**: income vs expense per ISO week
//! - **Payment Bar**: total expenses per payment mode
//! - **Heatmap**: expenses per category × payment-mode pair
//!
//! Each chart is generated as JSON configuration for the ECharts library
//! and embedded into a single self-contained HTML page with a container
//! div and initialization script per chart.

use std::fs;
use std::io;
use std::path::Path;

use charming::{
    component::{Axis, Grid, Legend, Title, VisualMap},
    datatype::{CompositeValue, DataFrame},
    element::{AxisType, Label, Orient, Tooltip, Trigger},
    series::{Bar, Heatmap, Line, Pie},
    Chart,
};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ledger::Ledger;

/// A dashboard chart with its HTML container ID and ECharts configuration.
struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    id: &'static str,
    /// The ECharts configuration as a JSON string
    options: String,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn category_bar(ledger: &Ledger) -> Chart {
    let totals = ledger.category_totals();
    let labels: Vec<String> = totals.iter().map(|(category, _)| category.clone()).collect();
    let values: Vec<f64> = totals.iter().map(|(_, sum)| to_f64(*sum)).collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Total Expense").data(values))
}

fn category_pie(ledger: &Ledger) -> Chart {
    let totals = ledger.category_totals();
    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|(category, sum)| (to_f64(*sum), category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expense Distribution by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left"))
        .series(Pie::new().name("Expense Share").radius("60%").data(data))
}

fn monthly_line(ledger: &Ledger) -> Chart {
    let pivot = ledger.monthly_pivot();
    let labels: Vec<String> = pivot.iter().map(|row| row.month.clone()).collect();
    let income: Vec<f64> = pivot.iter().map(|row| to_f64(row.income)).collect();
    let expense: Vec<f64> = pivot.iter().map(|row| to_f64(row.expense)).collect();
    let savings: Vec<f64> = pivot.iter().map(|row| to_f64(row.savings)).collect();

    Chart::new()
        .title(Title::new().text("Monthly Income vs Expense Trend"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expense").data(expense))
        .series(Line::new().name("Savings").data(savings))
}

fn weekly_line(ledger: &Ledger) -> Chart {
    let pivot = ledger.weekly_pivot();
    let labels: Vec<String> = pivot.iter().map(|row| row.week.to_string()).collect();
    let income: Vec<f64> = pivot.iter().map(|row| to_f64(row.income)).collect();
    let expense: Vec<f64> = pivot.iter().map(|row| to_f64(row.expense)).collect();

    Chart::new()
        .title(Title::new().text("Weekly Income vs Expense"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expense").data(expense))
}

fn payment_bar(ledger: &Ledger) -> Chart {
    let totals = ledger.payment_mode_totals();
    let labels: Vec<String> = totals.iter().map(|(mode, _)| mode.clone()).collect();
    let values: Vec<f64> = totals.iter().map(|(_, sum)| to_f64(*sum)).collect();

    Chart::new()
        .title(Title::new().text("Expenses by Payment Mode"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Total Expense").data(values))
}

fn payment_heatmap(ledger: &Ledger) -> Chart {
    let matrix = ledger.category_by_payment_matrix();
    let mut data: Vec<DataFrame> = Vec::new();
    let mut max = 0.0_f64;
    for (row, cells) in matrix.cells.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let value = to_f64(*cell);
            max = max.max(value);
            data.push(vec![
                CompositeValue::from(col as i64).into(),
                CompositeValue::from(row as i64).into(),
                CompositeValue::from(value).into(),
            ]);
        }
    }

    Chart::new()
        .title(Title::new().text("Expense Heatmap (Category vs Payment Mode)"))
        .tooltip(Tooltip::new())
        .x_axis(Axis::new().type_(AxisType::Category).data(matrix.modes))
        .y_axis(Axis::new().type_(AxisType::Category).data(matrix.categories))
        .visual_map(
            VisualMap::new()
                .min(0.0)
                .max(max)
                .calculable(true)
                .orient(Orient::Horizontal)
                .left("center")
                .bottom("0%"),
        )
        .series(
            Heatmap::new()
                .name("Expense")
                .label(Label::new().show(true))
                .data(data),
        )
}

fn dashboard_charts(ledger: &Ledger) -> Vec<DashboardChart> {
    vec![
        DashboardChart {
            id: "category-bar",
            options: category_bar(ledger).to_string(),
        },
        DashboardChart {
            id: "category-pie",
            options: category_pie(ledger).to_string(),
        },
        DashboardChart {
            id: "monthly-line",
            options: monthly_line(ledger).to_string(),
        },
        DashboardChart {
            id: "weekly-line",
            options: weekly_line(ledger).to_string(),
        },
        DashboardChart {
            id: "payment-bar",
            options: payment_bar(ledger).to_string(),
        },
        DashboardChart {
            id: "payment-heatmap",
            options: payment_heatmap(ledger).to_string(),
        },
    ]
}

/// Generates JavaScript initialization code for the dashboard charts.
fn charts_script(charts: &[DashboardChart]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
    const chart = echarts.init(document.getElementById("{}"));
    chart.setOption({});
    window.addEventListener('resize', chart.resize);
}})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the full dashboard page: one container div per chart plus the
/// initialization script, with the ECharts runtime loaded from a CDN.
pub fn dashboard_page(ledger: &Ledger) -> String {
    let charts = dashboard_charts(ledger);
    let script = charts_script(&charts);

    let markup: Markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Expense Tracker Dashboard" }
                script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js" {}
            }
            body {
                @for chart in &charts {
                    div id=(chart.id) style="width:900px;height:420px;margin:24px auto;" {}
                }
                script { (PreEscaped(script)) }
            }
        }
    };
    markup.into_string()
}

/// Writes the dashboard page to `path`.
pub fn save_dashboard<P: AsRef<Path>>(ledger: &Ledger, path: P) -> io::Result<()> {
    fs::write(path, dashboard_page(ledger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{Transaction, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_ledger() -> Ledger {
        Ledger::new(vec![
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                kind: TransactionKind::Income,
                category: "Salary".to_string(),
                amount: dec!(1000),
                payment_mode: "Bank Transfer".to_string(),
            },
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                kind: TransactionKind::Expense,
                category: "Food".to_string(),
                amount: dec!(400),
                payment_mode: "Cash".to_string(),
            },
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
                kind: TransactionKind::Expense,
                category: "Travel".to_string(),
                amount: dec!(60),
                payment_mode: "Card".to_string(),
            },
        ])
    }

    #[test]
    fn test_category_bar_options_contain_categories() {
        let options = category_bar(&sample_ledger()).to_string();
        assert!(options.contains("Food"));
        assert!(options.contains("Travel"));
        assert!(!options.contains("Salary")); // income categories are excluded
    }

    #[test]
    fn test_monthly_line_has_three_series() {
        let options = monthly_line(&sample_ledger()).to_string();
        assert!(options.contains("Income"));
        assert!(options.contains("Expense"));
        assert!(options.contains("Savings"));
    }

    #[test]
    fn test_dashboard_page_contains_all_containers() {
        let page = dashboard_page(&sample_ledger());
        for id in [
            "category-bar",
            "category-pie",
            "monthly-line",
            "weekly-line",
            "payment-bar",
            "payment-heatmap",
        ] {
            assert!(page.contains(id), "missing container for {}", id);
        }
        assert!(page.contains("echarts.init"));
    }

    #[test]
    fn test_dashboard_page_renders_for_empty_ledger() {
        let page = dashboard_page(&Ledger::new(vec![]));
        assert!(page.contains("payment-heatmap"));
    }
}
