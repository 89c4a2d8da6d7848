//! Visible page projection
//!
//! Filters, orders and slices the transaction list for display. Read-only:
//! nothing here touches the ledger.

use crate::models::{Transaction, TransactionFilter};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One page of the filtered, date-ordered transaction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Rows on this page, newest date first
    pub items: Vec<Transaction>,
    /// Number of transactions that matched the filter
    pub total_matched: usize,
    /// Number of pages, never less than one
    pub page_count: usize,
    /// The requested 1-based page
    pub page: usize,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Compute the visible slice for `page` (1-based)
///
/// Matching transactions are sorted by date descending; transactions sharing a
/// date keep their list order. Pages past the end come back empty rather than
/// being clamped.
pub fn project(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    page: usize,
    page_size: usize,
) -> Page {
    let page_size = page_size.max(1);

    let mut matched: Vec<&Transaction> =
        transactions.iter().filter(|t| filter.matches(t)).collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));

    let total_matched = matched.len();
    let page_count = total_matched.div_ceil(page_size).max(1);

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items = matched
        .into_iter()
        .skip(start)
        .take(if page == 0 { 0 } else { page_size })
        .cloned()
        .collect();

    Page {
        items,
        total_matched,
        page_count,
        page,
    }
}

/// Clamp a user-requested page into `[1, page_count]`
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerSnapshot, Money, TypeFilter};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    fn four_items() -> Vec<Transaction> {
        vec![
            Transaction::deposit(Money::from_cents(350_000), "Salary", date(1)),
            Transaction::withdrawal(Money::from_cents(4_550), "Grocery", date(3)),
            Transaction::deposit(Money::from_cents(15_000), "Refund", date(7)),
            Transaction::withdrawal(Money::from_cents(1_499), "Sally's Cafe", date(8)),
        ]
    }

    #[test]
    fn test_type_and_search_filter() {
        let txns = four_items();
        let filter = TransactionFilter::new()
            .kind(TypeFilter::Deposit)
            .search("sal");

        let page = project(&txns, &filter, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_matched, 1);
        assert_eq!(page.items[0].description, "Salary");
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let txns = four_items();
        let page = project(&txns, &TransactionFilter::new(), 1, DEFAULT_PAGE_SIZE);

        let dates: Vec<_> = page.items.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(8), date(7), date(3), date(1)]);
    }

    #[test]
    fn test_equal_dates_keep_list_order() {
        let txns = vec![
            Transaction::deposit(Money::from_cents(100), "First", date(5)),
            Transaction::deposit(Money::from_cents(100), "Second", date(5)),
            Transaction::deposit(Money::from_cents(100), "Older", date(4)),
        ];
        let page = project(&txns, &TransactionFilter::new(), 1, 10);

        let names: Vec<_> = page.items.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Older"]);
    }

    #[test]
    fn test_inclusive_date_bounds() {
        let txns = four_items();
        let filter = TransactionFilter::new().date_range(Some(date(3)), Some(date(7)));

        let page = project(&txns, &filter, 1, 10);
        assert_eq!(page.total_matched, 2);
    }

    #[test]
    fn test_pagination() {
        let snapshot = LedgerSnapshot::seeded();
        let filter = TransactionFilter::new();

        let first = project(&snapshot.transactions, &filter, 1, 5);
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.page_count, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = project(&snapshot.transactions, &filter, 3, 5);
        assert_eq!(last.items.len(), 3);
        assert!(!last.has_next());

        // newest date first across pages
        assert_eq!(first.items[0].date, date(14));
        assert_eq!(last.items[2].date, date(1));
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let txns = four_items();
        let filter = TransactionFilter::new();

        assert!(project(&txns, &filter, 9, 2).items.is_empty());
        assert!(project(&txns, &filter, 0, 2).items.is_empty());
        assert!(project(&txns, &filter, usize::MAX, 2).items.is_empty());
    }

    #[test]
    fn test_empty_set_has_one_page() {
        let page = project(&[], &TransactionFilter::new(), 1, 20);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total_matched, 0);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
