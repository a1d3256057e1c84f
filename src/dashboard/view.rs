//! The maud templates for the dashboard page.

use maud::{Markup, html};

use crate::{
    analytics::{CategorySlice, FilterQuery, IncomeSlice, RangePreset, Summary},
    currency::Currency,
    endpoints,
    html::{CARD_STYLE, filter_form, link},
};

/// The whole-budget figures shown at the top of the dashboard.
pub struct BudgetOverview {
    pub name: String,
    pub currency: Currency,
    pub amount: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
}

/// The dashboard shown when no budget exists yet.
pub fn no_budget_view() -> Markup {
    html! {
        div class="text-center py-8" {
            h1 class="text-2xl font-bold mb-2" { "💰 Centsible" }
            p class="mb-4" { "Track your expenses and manage your budget wisely." }
            p { (link(endpoints::NEW_BUDGET_VIEW, "Create a budget to get started")) }
        }
    }
}

pub fn dashboard_view(
    overview: &BudgetOverview,
    summary: &Summary,
    categories: &[CategorySlice],
    income: &[IncomeSlice],
    query: &FilterQuery,
) -> Markup {
    html! {
        div class="w-full max-w-4xl" {
            (overview_card(overview))

            div class="flex flex-wrap items-end justify-between gap-2 mt-6" {
                (filter_form(query, endpoints::DASHBOARD_VIEW))

                p class="mb-4" { (link(&expenses_link(query), "View matching expenses")) }
            }

            (statistics_cards(overview.currency, summary))

            (category_breakdown_view(overview.currency, categories))

            @if !income.is_empty() {
                (income_breakdown_view(overview.currency, income))
            }
        }
    }
}

fn overview_card(overview: &BudgetOverview) -> Markup {
    let remaining_style = if overview.remaining < 0.0 {
        "text-xl font-bold text-red-600 dark:text-red-400"
    } else {
        "text-xl font-bold text-green-700 dark:text-green-400"
    };

    html! {
        section class=(CARD_STYLE) {
            div class="flex items-baseline justify-between mb-4" {
                h1 class="text-xl font-bold" { (overview.name) }
                span class="text-sm text-gray-600 dark:text-gray-400" {
                    (overview.currency.code())
                }
            }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-4" {
                div {
                    p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-1" {
                        "Total Budget"
                    }
                    p class="text-xl font-bold" { (overview.currency.format(overview.amount)) }
                }
                div {
                    p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-1" {
                        "Total Spent"
                    }
                    p class="text-xl font-bold" { (overview.currency.format(overview.total_spent)) }
                }
                div {
                    p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-1" {
                        "Remaining"
                    }
                    p class=(remaining_style) { (overview.currency.format(overview.remaining)) }
                }
            }

            (progress_bar(overview.percentage_used))

            p class="text-sm text-gray-600 dark:text-gray-400 mt-2" {
                (format!("{:.1}%", overview.percentage_used)) " of budget used"
            }
        }
    }
}

/// Renders a horizontal progress bar showing how much of the budget is used.
fn progress_bar(percentage: f64) -> Markup {
    let clamped = percentage.clamp(0.0, 100.0);

    // Ensure minimum 3% width so rounded corners are visible
    let display_percentage = if clamped > 0.0 && clamped < 3.0 {
        3.0
    } else {
        clamped
    };

    html! {
        div
            class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5"
            role="progressbar"
            aria-valuenow=(format!("{:.0}", clamped))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if clamped > 0.0 {
                div
                    class="bg-blue-600 dark:bg-blue-500 h-2.5 rounded-full transition-all"
                    style=(format!("width: {:.1}%", display_percentage))
                {}
            }
        }
    }
}

fn statistics_cards(currency: Currency, summary: &Summary) -> Markup {
    let stats = [
        ("Total Expenses", summary.count.to_string()),
        ("Total Spent", currency.format(summary.total_spent)),
        ("Average per Expense", currency.format(summary.average)),
        ("Largest Expense", currency.format(summary.largest)),
        ("Daily Average", currency.format(summary.daily_average_this_month)),
    ];

    html! {
        section class="w-full mt-6" {
            h2 class="text-lg font-semibold mb-3" { "Statistics" }

            div class="grid grid-cols-2 md:grid-cols-5 gap-4" {
                @for (label, value) in stats {
                    div class=(CARD_STYLE) {
                        p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-2 text-center" {
                            (label)
                        }
                        p class="text-lg font-bold text-center" { (value) }
                    }
                }
            }
        }
    }
}

fn category_breakdown_view(currency: Currency, categories: &[CategorySlice]) -> Markup {
    html! {
        section class="w-full mt-6" {
            h2 class="text-lg font-semibold mb-3" { "Spending by Category" }

            @if categories.is_empty() {
                p class="text-center text-gray-500 py-8" { "No category data available yet." }
            } @else {
                div class="space-y-4" {
                    @for slice in categories {
                        (category_bar(currency, slice))
                    }
                }
            }
        }
    }
}

fn category_bar(currency: Currency, slice: &CategorySlice) -> Markup {
    let width = slice.percentage.clamp(0.0, 100.0);
    let bar_style = format!(
        "width: {width:.1}%; background-color: {}; min-width: {}",
        slice.category.color(),
        if width > 0.0 { "40px" } else { "0" },
    );

    html! {
        div class="flex items-center gap-3" {
            div class="min-w-[160px] font-semibold text-sm" {
                (slice.category.display_label())
            }
            div class="flex-1 relative h-8 bg-gray-100 dark:bg-gray-700 rounded-full overflow-hidden border border-gray-200 dark:border-gray-600" {
                div
                    class="breakdown-bar h-full flex items-center px-3 text-white text-xs font-bold rounded-full"
                    style=(bar_style)
                {
                    @if slice.percentage > 8.0 {
                        (format!("{:.1}%", slice.percentage))
                    }
                }
            }
            div class="min-w-[100px] text-right font-bold" {
                (currency.format(slice.amount))
            }
        }
    }
}

fn income_breakdown_view(currency: Currency, income: &[IncomeSlice]) -> Markup {
    html! {
        section class="w-full mt-6" {
            h2 class="text-lg font-semibold mb-3" { "Income Breakdown" }

            div class="space-y-2" {
                @for slice in income {
                    div class="flex items-center justify-between gap-3" {
                        span class="font-medium text-sm" { (slice.name) }
                        span class="text-xs text-gray-600 dark:text-gray-400" {
                            (format!("{:.1}%", slice.percentage))
                        }
                        span class="font-bold" { (currency.format(slice.amount)) }
                    }
                }
            }
        }
    }
}

fn expenses_link(query: &FilterQuery) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if let Some(category) = query.selected_category() {
        params.push(("category", category.as_slug().to_owned()));
    }

    let preset = query.range_preset();
    if preset != RangePreset::All {
        params.push(("range", preset.as_query_value().to_owned()));
    }

    if let Some(start) = query.start {
        params.push(("start", start.to_string()));
    }

    if let Some(end) = query.end {
        params.push(("end", end.to_string()));
    }

    if params.is_empty() {
        return endpoints::EXPENSES_VIEW.to_owned();
    }

    match serde_urlencoded::to_string(&params) {
        Ok(query_string) => format!("{}?{query_string}", endpoints::EXPENSES_VIEW),
        Err(error) => {
            tracing::error!("could not encode expenses filter link: {error}");
            endpoints::EXPENSES_VIEW.to_owned()
        }
    }
}

#[cfg(test)]
mod dashboard_view_tests {
    use super::{expenses_link, progress_bar};
    use crate::analytics::{FilterQuery, RangePreset};

    #[test]
    fn progress_bar_has_minimum_width_for_small_percentages() {
        let html = progress_bar(0.5).into_string();

        assert!(html.contains("width: 3.0%"));
    }

    #[test]
    fn progress_bar_empty_for_zero_percentage() {
        let html = progress_bar(0.0).into_string();

        assert!(html.contains("progressbar"));
        assert!(!html.contains("bg-blue-600"));
    }

    #[test]
    fn progress_bar_clamps_over_100() {
        let html = progress_bar(150.0).into_string();

        assert!(html.contains("width: 100.0%"));
    }

    #[test]
    fn expenses_link_carries_the_active_filters() {
        let query = FilterQuery {
            category: Some("food".to_owned()),
            range: Some(RangePreset::ThisMonth),
            start: None,
            end: None,
        };

        assert_eq!(
            expenses_link(&query),
            "/expenses?category=food&range=this-month"
        );
    }

    #[test]
    fn expenses_link_without_filters_is_bare() {
        assert_eq!(expenses_link(&FilterQuery::default()), "/expenses");
    }
}
