//! GetRevenueReportHandler - Income over a half-open time range.
//!
//! Transactions snapshot their package name, so a report still labels sales
//! of packages that were since renamed or deleted.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Money, PaymentMethodId, Timestamp};
use crate::domain::membership::{MembershipError, Transaction};
use crate::ports::{PaymentMethodRepository, TransactionReader};

const UNSPECIFIED: &str = "Unspecified";

#[derive(Debug, Clone)]
pub struct GetRevenueReportQuery {
    pub from: Timestamp,
    pub to: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueLine {
    pub label: String,
    pub total: Money,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueReport {
    pub from: Timestamp,
    pub to: Timestamp,
    pub total: Money,
    pub transaction_count: usize,
    pub by_package: Vec<RevenueLine>,
    pub by_payment_method: Vec<RevenueLine>,
}

pub struct GetRevenueReportHandler {
    transactions: Arc<dyn TransactionReader>,
    methods: Arc<dyn PaymentMethodRepository>,
}

impl GetRevenueReportHandler {
    pub fn new(transactions: Arc<dyn TransactionReader>, methods: Arc<dyn PaymentMethodRepository>) -> Self {
        Self {
            transactions,
            methods,
        }
    }

    pub async fn handle(&self, query: GetRevenueReportQuery) -> Result<RevenueReport, MembershipError> {
        if !query.to.is_after(&query.from) {
            return Err(MembershipError::validation("to", "Report range must end after it starts"));
        }

        let transactions = self.transactions.list_between(query.from, query.to).await?;
        let method_names: HashMap<PaymentMethodId, String> = self
            .methods
            .list(true)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        let by_package = group(&transactions, |tx| tx.package_name.clone());
        let by_payment_method = group(&transactions, |tx| {
            tx.payment_method_id
                .and_then(|id| method_names.get(&id).cloned())
                .unwrap_or_else(|| UNSPECIFIED.to_string())
        });

        Ok(RevenueReport {
            from: query.from,
            to: query.to,
            total: transactions.iter().map(|tx| tx.amount).sum(),
            transaction_count: transactions.len(),
            by_package,
            by_payment_method,
        })
    }
}

/// Groups by label, largest total first.
fn group<F>(transactions: &[Transaction], label: F) -> Vec<RevenueLine>
where
    F: Fn(&Transaction) -> String,
{
    let mut lines: HashMap<String, RevenueLine> = HashMap::new();
    for tx in transactions {
        let key = label(tx);
        let line = lines.entry(key.clone()).or_insert_with(|| RevenueLine {
            label: key,
            total: Money::ZERO,
            count: 0,
        });
        line.total = line.total + tx.amount;
        line.count += 1;
    }

    let mut lines: Vec<RevenueLine> = lines.into_values().collect();
    lines.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::foundation::{PeriodId, TransactionId};
    use crate::domain::membership::{MemberCache, MembershipPackage, MembershipPeriod, PeriodBounds};
    use crate::ports::{LedgerWrite, LedgerWriter, PackageRepository};

    async fn sell(fx: &Fixture, package: &MembershipPackage, method: Option<PaymentMethodId>, at: &str) {
        let member = fx.register("Walk-in", None).await;
        let tx = Transaction::record_sale(
            TransactionId::new(),
            member.id,
            package,
            method,
            None,
            ts(at),
            None,
        );
        let period = MembershipPeriod::open(
            PeriodId::new(),
            member.id,
            PeriodBounds {
                start: ts(at),
                end: ts(at).add_days(1),
            },
            &package.name,
            package.duration,
            Some(tx.link()),
            ts(at),
        )
        .unwrap();
        let cache = MemberCache::from_ledger(std::slice::from_ref(&period));
        fx.store
            .commit(LedgerWrite::period(period, cache, ts(at)).with_transaction(tx))
            .await
            .unwrap();
    }

    fn handler(fx: &Fixture) -> GetRevenueReportHandler {
        GetRevenueReportHandler::new(fx.store.clone(), fx.store.clone())
    }

    #[tokio::test]
    async fn totals_and_breakdowns() {
        let fx = Fixture::at("2024-03-01T00:00:00Z").await;
        sell(&fx, &fx.monthly, Some(fx.cash.id), "2024-02-01T09:00:00Z").await;
        sell(&fx, &fx.monthly, None, "2024-02-10T09:00:00Z").await;
        sell(&fx, &fx.day_pass, Some(fx.cash.id), "2024-02-11T09:00:00Z").await;
        sell(&fx, &fx.quarterly, Some(fx.cash.id), "2024-03-05T09:00:00Z").await;

        let report = handler(&fx)
            .handle(GetRevenueReportQuery {
                from: ts("2024-02-01T00:00:00Z"),
                to: ts("2024-03-01T00:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.total.minor_units(), 325_000);
        assert_eq!(
            report.by_package,
            vec![
                RevenueLine {
                    label: "Monthly".to_string(),
                    total: Money::from_minor_units(300_000),
                    count: 2,
                },
                RevenueLine {
                    label: "Day Pass".to_string(),
                    total: Money::from_minor_units(25_000),
                    count: 1,
                },
            ]
        );
        let methods: Vec<_> = report.by_payment_method.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(methods, vec!["Cash", "Unspecified"]);
    }

    #[tokio::test]
    async fn deleted_package_keeps_its_label() {
        let fx = Fixture::at("2024-03-01T00:00:00Z").await;
        sell(&fx, &fx.quarterly, Some(fx.cash.id), "2024-02-01T09:00:00Z").await;
        PackageRepository::delete(fx.store.as_ref(), &fx.quarterly.id).await.unwrap();

        let report = handler(&fx)
            .handle(GetRevenueReportQuery {
                from: ts("2024-01-01T00:00:00Z"),
                to: ts("2024-03-01T00:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(report.by_package[0].label, "Quarterly");
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let fx = Fixture::at("2024-03-01T00:00:00Z").await;
        let result = handler(&fx)
            .handle(GetRevenueReportQuery {
                from: ts("2024-03-01T00:00:00Z"),
                to: ts("2024-03-01T00:00:00Z"),
            })
            .await;
        assert!(matches!(result, Err(MembershipError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn empty_range_reports_zero() {
        let fx = Fixture::at("2024-03-01T00:00:00Z").await;
        let report = handler(&fx)
            .handle(GetRevenueReportQuery {
                from: ts("2020-01-01T00:00:00Z"),
                to: ts("2020-02-01T00:00:00Z"),
            })
            .await
            .unwrap();
        assert_eq!(report.total, Money::ZERO);
        assert!(report.by_package.is_empty());
    }
}
