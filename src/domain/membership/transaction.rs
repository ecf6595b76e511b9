//! Immutable payment records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Money, PackageId, PaymentMethodId, Timestamp, TransactionId};

use super::{MembershipPackage, PackageDuration, PaymentLink};

/// A payment for a package.
///
/// Package name and duration are snapshotted so later package edits do not
/// rewrite financial history. References become `None` when the referenced
/// row is deleted; the record itself survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub member_id: Option<MemberId>,
    pub package_id: Option<PackageId>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Money,
    pub package_name: String,
    pub duration: PackageDuration,
    pub occurred_at: Timestamp,
    pub notes: Option<String>,
}

impl Transaction {
    /// Records a sale of `package`. The amount defaults to the package price.
    pub fn record_sale(
        id: TransactionId,
        member_id: MemberId,
        package: &MembershipPackage,
        payment_method_id: Option<PaymentMethodId>,
        amount: Option<Money>,
        occurred_at: Timestamp,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            member_id: Some(member_id),
            package_id: Some(package.id),
            payment_method_id,
            amount: amount.unwrap_or(package.price),
            package_name: package.name.clone(),
            duration: package.duration,
            occurred_at,
            notes: notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        }
    }

    /// Link stored on the period this transaction paid for.
    pub fn link(&self) -> PaymentLink {
        PaymentLink {
            transaction_id: self.id,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{NewPackage, DAY_PASS_PACKAGE_NAME};

    fn quarterly() -> MembershipPackage {
        MembershipPackage::create(
            PackageId::new(),
            NewPackage {
                name: "Quarterly".to_string(),
                duration: PackageDuration::Months(3),
                price: Money::from_minor_units(400_000),
                description: None,
            },
            DAY_PASS_PACKAGE_NAME,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn sale_snapshots_package() {
        let mut package = quarterly();
        let tx = Transaction::record_sale(
            TransactionId::new(),
            MemberId::new(),
            &package,
            None,
            None,
            Timestamp::now(),
            None,
        );
        package.name = "Quarterly (old)".to_string();

        assert_eq!(tx.package_name, "Quarterly");
        assert_eq!(tx.duration, PackageDuration::Months(3));
        assert_eq!(tx.amount.minor_units(), 400_000);
    }

    #[test]
    fn explicit_amount_overrides_price() {
        let tx = Transaction::record_sale(
            TransactionId::new(),
            MemberId::new(),
            &quarterly(),
            Some(PaymentMethodId::new()),
            Some(Money::from_minor_units(350_000)),
            Timestamp::now(),
            Some("promo".to_string()),
        );
        assert_eq!(tx.link().amount.minor_units(), 350_000);
        assert_eq!(tx.link().transaction_id, tx.id);
    }
}
