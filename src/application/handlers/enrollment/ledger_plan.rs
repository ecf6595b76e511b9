//! Steps shared by every path that appends a period to the ledger.

use crate::domain::foundation::{Money, PeriodId, Timestamp, TransactionId};
use crate::domain::foundation::{MemberId, PackageId, PaymentMethodId};
use crate::domain::membership::{
    Member, MemberCache, MembershipError, MembershipPackage, MembershipPeriod, MembershipRules,
    PackageDuration, PaymentLink, Transaction,
};
use crate::ports::{MemberRepository, PackageRepository, PaymentMethodRepository};

/// A priced sale that produces a transaction alongside its period.
#[derive(Debug, Clone)]
pub(super) struct Sale {
    pub package: MembershipPackage,
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Option<Money>,
    pub notes: Option<String>,
}

/// A new period with the writes that accompany it.
#[derive(Debug, Clone)]
pub(super) struct PlannedPeriod {
    pub period: MembershipPeriod,
    pub transaction: Option<Transaction>,
    /// Cache derived from the history plus `period`.
    pub cache: MemberCache,
}

pub(super) async fn load_member(
    members: &dyn MemberRepository,
    member_id: MemberId,
) -> Result<Member, MembershipError> {
    members
        .find_by_id(&member_id)
        .await?
        .ok_or(MembershipError::MemberNotFound(member_id))
}

/// Loads a package that can still be sold.
pub(super) async fn load_sellable_package(
    packages: &dyn PackageRepository,
    package_id: PackageId,
) -> Result<MembershipPackage, MembershipError> {
    let package = packages
        .find_by_id(&package_id)
        .await?
        .ok_or(MembershipError::PackageNotFound(package_id))?;
    if !package.is_active {
        return Err(MembershipError::validation(
            "package_id",
            format!("package '{}' is not on sale", package.name),
        ));
    }
    Ok(package)
}

/// Loads the active Day Pass package.
pub(super) async fn load_day_pass(
    packages: &dyn PackageRepository,
    rules: &MembershipRules,
) -> Result<MembershipPackage, MembershipError> {
    packages
        .find_active_by_name(&rules.day_pass_name)
        .await?
        .filter(MembershipPackage::is_day_pass)
        .ok_or_else(|| MembershipError::DayPassUnavailable(rules.day_pass_name.clone()))
}

pub(super) async fn ensure_payment_method(
    methods: &dyn PaymentMethodRepository,
    payment_method_id: Option<PaymentMethodId>,
) -> Result<(), MembershipError> {
    let Some(id) = payment_method_id else {
        return Ok(());
    };
    match methods.find_by_id(&id).await? {
        Some(method) if method.is_active => Ok(()),
        Some(method) => Err(MembershipError::validation(
            "payment_method_id",
            format!("payment method '{}' is disabled", method.name),
        )),
        None => Err(MembershipError::PaymentMethodNotFound(id)),
    }
}

/// Plans a sold period and its transaction.
pub(super) fn plan_sale(
    rules: &MembershipRules,
    member_id: MemberId,
    history: &[MembershipPeriod],
    sale: Sale,
    explicit_start: Option<Timestamp>,
    now: Timestamp,
) -> Result<PlannedPeriod, MembershipError> {
    let transaction = Transaction::record_sale(
        TransactionId::new(),
        member_id,
        &sale.package,
        sale.payment_method_id,
        sale.amount,
        now,
        sale.notes,
    );
    let mut planned = plan_period(
        rules,
        member_id,
        history,
        &sale.package.name,
        sale.package.duration,
        Some(transaction.link()),
        explicit_start,
        now,
    )?;
    planned.transaction = Some(transaction);
    Ok(planned)
}

/// Plans a period with no payment attached.
#[allow(clippy::too_many_arguments)]
pub(super) fn plan_period(
    rules: &MembershipRules,
    member_id: MemberId,
    history: &[MembershipPeriod],
    package_name: &str,
    duration: PackageDuration,
    payment: Option<PaymentLink>,
    explicit_start: Option<Timestamp>,
    now: Timestamp,
) -> Result<PlannedPeriod, MembershipError> {
    let bounds = rules
        .temporal_policy()
        .compute_new_period(duration, history, now, explicit_start)?;
    let period = MembershipPeriod::open(
        PeriodId::new(),
        member_id,
        bounds,
        package_name,
        duration,
        payment,
        now,
    )?;

    let mut ledger = history.to_vec();
    ledger.push(period.clone());
    let cache = MemberCache::from_ledger(&ledger);

    Ok(PlannedPeriod {
        period,
        transaction: None,
        cache,
    })
}
