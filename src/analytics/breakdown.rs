//! Category and income-source breakdowns with percentage shares.

use std::{cmp::Ordering, collections::HashMap};

use crate::{
    category::Category,
    ledger::{Expense, IncomeSource},
};

/// One category's share of the total spend.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// The category the amounts were grouped under.
    pub category: Category,
    /// The summed amount for the category.
    pub amount: f64,
    /// The category's percentage of the grand total, or 0 when the grand
    /// total is 0.
    pub percentage: f64,
}

/// One income source's share of the total income.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeSlice {
    /// The income source name.
    pub name: String,
    /// The source's amount.
    pub amount: f64,
    /// The source's percentage of the total income, or 0 when the total is 0.
    pub percentage: f64,
}

/// Group expenses by category, with each group's percentage of the total.
///
/// The result is sorted descending by amount; equal amounts fall back to the
/// category display order so the output is deterministic. Categories that
/// were unrecognized at load time appear under [Category::Other] rather than
/// being dropped.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategorySlice> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    let total_spent: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            category,
            amount,
            percentage: percentage_of(amount, total_spent),
        })
        .collect();

    slices.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    slices
}

/// Each income source's percentage of the total income, sorted descending by
/// amount.
///
/// The sort is stable, so equally sized sources keep their insertion order.
pub fn income_breakdown(sources: &[IncomeSource]) -> Vec<IncomeSlice> {
    let total_income: f64 = sources.iter().map(|source| source.amount).sum();

    let mut slices: Vec<IncomeSlice> = sources
        .iter()
        .map(|source| IncomeSlice {
            name: source.name.clone(),
            amount: source.amount,
            percentage: percentage_of(source.amount, total_income),
        })
        .collect();

    slices.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));

    slices
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 { (amount / total) * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod breakdown_tests {
    use time::macros::date;

    use super::{category_breakdown, income_breakdown};
    use crate::{
        category::Category,
        ledger::{Expense, IncomeSource},
    };

    fn expense(amount: f64, category: Category) -> Expense {
        Expense {
            id: format!("{category:?}-{amount}"),
            budget_id: None,
            label: "Test".to_owned(),
            amount,
            category,
            date: date!(2024 - 03 - 01),
        }
    }

    fn source(name: &str, amount: f64) -> IncomeSource {
        IncomeSource {
            id: name.to_owned(),
            budget_id: "budget-a".to_owned(),
            name: name.to_owned(),
            amount,
        }
    }

    #[test]
    fn groups_and_sorts_descending_by_amount() {
        let expenses = vec![
            expense(50.0, Category::Food),
            expense(200.0, Category::Housing),
            expense(100.0, Category::Food),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, Category::Housing);
        assert_eq!(breakdown[0].amount, 200.0);
        assert_eq!(breakdown[1].category, Category::Food);
        assert_eq!(breakdown[1].amount, 150.0);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let expenses = vec![
            expense(20.0, Category::Food),
            expense(30.0, Category::Housing),
            expense(50.0, Category::Shopping),
        ];

        let breakdown = category_breakdown(&expenses);

        let total: f64 = breakdown.iter().map(|slice| slice.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9, "percentages summed to {total}");
    }

    #[test]
    fn zero_total_yields_zero_percentages() {
        let breakdown = category_breakdown(&[]);

        assert!(breakdown.is_empty());

        // A breakdown over zero-amount data must define percentages as 0
        // rather than dividing by zero.
        let expenses = vec![expense(0.0, Category::Food)];
        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].percentage, 0.0);
    }

    #[test]
    fn single_category_scenario() {
        let expenses = vec![
            expense(200.0, Category::Food),
            expense(300.0, Category::Food),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category, Category::Food);
        assert_eq!(breakdown[0].amount, 500.0);
        assert_eq!(breakdown[0].percentage, 100.0);
    }

    #[test]
    fn equal_amounts_break_ties_by_display_order() {
        let expenses = vec![
            expense(100.0, Category::Savings),
            expense(100.0, Category::Food),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown[0].category, Category::Food);
        assert_eq!(breakdown[1].category, Category::Savings);
    }

    #[test]
    fn unknown_categories_appear_as_other() {
        // An unrecognized stored value deserializes to Other and must still
        // show up in the breakdown.
        let unknown: Category = serde_json::from_str("\"subscriptions\"").unwrap();
        let expenses = vec![expense(60.0, Category::Food), expense(40.0, unknown)];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[1].category, Category::Other);
        assert_eq!(breakdown[1].percentage, 40.0);
    }

    #[test]
    fn income_breakdown_sorts_descending_with_percentages() {
        let sources = vec![
            source("Freelance", 500.0),
            source("Salary", 1000.0),
            source("Dividends", 500.0),
        ];

        let breakdown = income_breakdown(&sources);

        assert_eq!(breakdown[0].name, "Salary");
        assert_eq!(breakdown[0].percentage, 50.0);
        // The stable sort keeps the two 500s in insertion order.
        assert_eq!(breakdown[1].name, "Freelance");
        assert_eq!(breakdown[2].name, "Dividends");
    }

    #[test]
    fn income_breakdown_of_nothing_is_empty() {
        assert!(income_breakdown(&[]).is_empty());
    }
}
