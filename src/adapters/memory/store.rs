//! In-memory implementation of every persistence port.
//!
//! All tables live behind one `tokio::sync::RwLock`, so a ledger commit is
//! applied under a single write guard and readers never observe half of it.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, PackageId, PaymentMethodId, Timestamp,
};
use crate::domain::membership::{
    CheckIn, Member, MembershipPackage, MembershipPeriod, PaymentLink, PaymentMethod, Transaction,
};
use crate::ports::{
    CheckInRepository, LedgerWrite, LedgerWriter, MemberPage, MemberQuery, MemberReader,
    MemberRepository, PackageRepository, PaymentMethodRepository, PeriodLedger, TransactionReader,
};

#[derive(Debug, Default)]
struct Tables {
    members: HashMap<MemberId, Member>,
    packages: HashMap<PackageId, MembershipPackage>,
    payment_methods: HashMap<PaymentMethodId, PaymentMethod>,
    transactions: Vec<Transaction>,
    periods: Vec<MembershipPeriod>,
    check_ins: Vec<CheckIn>,
}

impl Tables {
    fn ensure_single_active_day_pass(&self, package: &MembershipPackage) -> Result<(), DomainError> {
        let clash = package.is_active
            && package.is_day_pass()
            && self
                .packages
                .values()
                .any(|p| p.id != package.id && p.is_active && p.is_day_pass());
        if clash {
            return Err(DomainError::new(
                ErrorCode::DuplicateDayPass,
                "An active Day Pass package already exists",
            ));
        }
        Ok(())
    }

    /// Rejects a write that would leave the store inconsistent, before any
    /// part of it is applied.
    fn check_ledger_write(&self, write: &LedgerWrite) -> Result<(), DomainError> {
        let member_id = write.member_id();
        let member_exists = self.members.contains_key(&member_id)
            || write.new_member.as_ref().map(|m| m.id) == Some(member_id);
        if !member_exists {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        if let Some(member) = &write.new_member {
            if self.members.contains_key(&member.id) {
                return Err(DomainError::new(ErrorCode::DatabaseError, "Member already exists"));
            }
        }
        if let Some(link) = write.period.payment {
            let paid_by_write = write.transaction.as_ref().map(|t| t.id) == Some(link.transaction_id);
            let already_stored = self.transactions.iter().any(|t| t.id == link.transaction_id);
            if !paid_by_write && !already_stored {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Period references an unknown transaction",
                ));
            }
        }
        Ok(())
    }
}

/// Thread-safe in-memory store implementing all persistence ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let ledger: Arc<dyn PeriodLedger> = store.clone();
/// let writer: Arc<dyn LedgerWriter> = store.clone();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Number of stored transactions.
    pub async fn transaction_count(&self) -> usize {
        self.tables.read().await.transactions.len()
    }

    /// Number of stored periods across all members.
    pub async fn period_count(&self) -> usize {
        self.tables.read().await.periods.len()
    }
}

fn matches_search(member: &Member, needle: &str) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .map(|v| v.to_lowercase().contains(needle))
            .unwrap_or(false)
    };
    member.name.to_lowercase().contains(needle) || contains(&member.phone) || contains(&member.email)
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.members.contains_key(&member.id) {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Member already exists"));
        }
        tables.members.insert(member.id, member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.tables.read().await.members.get(id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Member>, DomainError> {
        let phone = phone.trim();
        let tables = self.tables.read().await;
        let mut found: Vec<Member> = tables
            .members
            .values()
            .filter(|m| m.phone.as_deref() == Some(phone))
            .cloned()
            .collect();
        found.sort_by_key(|m| m.created_at);
        Ok(found)
    }

    async fn update_profile(&self, member: &Member) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .members
            .get_mut(&member.id)
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
        stored.name = member.name.clone();
        stored.phone = member.phone.clone();
        stored.email = member.email.clone();
        stored.notes = member.notes.clone();
        stored.is_active = member.is_active;
        stored.updated_at = member.updated_at;
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.members.remove(id).is_none() {
            return Ok(false);
        }
        tables.periods.retain(|p| p.member_id != *id);
        tables.check_ins.retain(|c| c.member_id != *id);
        for tx in tables.transactions.iter_mut().filter(|t| t.member_id == Some(*id)) {
            tx.member_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl MemberReader for InMemoryStore {
    async fn list(&self, query: &MemberQuery) -> Result<MemberPage, DomainError> {
        let tables = self.tables.read().await;
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<&Member> = tables
            .members
            .values()
            .filter(|m| needle.as_deref().map(|n| matches_search(m, n)).unwrap_or(true))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(query.per_page as usize)
            .cloned()
            .collect();

        Ok(MemberPage {
            items,
            total,
            page: query.page,
            per_page: query.per_page,
        })
    }
}

#[async_trait]
impl PackageRepository for InMemoryStore {
    async fn save(&self, package: &MembershipPackage) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.ensure_single_active_day_pass(package)?;
        tables.packages.insert(package.id, package.clone());
        Ok(())
    }

    async fn update(&self, package: &MembershipPackage) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.packages.contains_key(&package.id) {
            return Err(DomainError::new(ErrorCode::PackageNotFound, "Package not found"));
        }
        tables.ensure_single_active_day_pass(package)?;
        tables.packages.insert(package.id, package.clone());
        Ok(())
    }

    async fn delete(&self, id: &PackageId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.packages.remove(id).is_none() {
            return Ok(false);
        }
        for tx in tables.transactions.iter_mut().filter(|t| t.package_id == Some(*id)) {
            tx.package_id = None;
        }
        Ok(true)
    }

    async fn find_by_id(&self, id: &PackageId) -> Result<Option<MembershipPackage>, DomainError> {
        Ok(self.tables.read().await.packages.get(id).cloned())
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<MembershipPackage>, DomainError> {
        let name = name.trim();
        let tables = self.tables.read().await;
        Ok(tables
            .packages
            .values()
            .filter(|p| p.is_active && p.name.eq_ignore_ascii_case(name))
            .min_by_key(|p| p.created_at)
            .cloned())
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<MembershipPackage>, DomainError> {
        let tables = self.tables.read().await;
        let mut packages: Vec<MembershipPackage> = tables
            .packages
            .values()
            .filter(|p| include_inactive || p.is_active)
            .cloned()
            .collect();
        packages.sort_by(|a, b| {
            a.duration
                .months()
                .cmp(&b.duration.months())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(packages)
    }
}

#[async_trait]
impl PaymentMethodRepository for InMemoryStore {
    async fn save(&self, method: &PaymentMethod) -> Result<(), DomainError> {
        self.tables
            .write()
            .await
            .payment_methods
            .insert(method.id, method.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentMethodId) -> Result<Option<PaymentMethod>, DomainError> {
        Ok(self.tables.read().await.payment_methods.get(id).cloned())
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<PaymentMethod>, DomainError> {
        let tables = self.tables.read().await;
        let mut methods: Vec<PaymentMethod> = tables
            .payment_methods
            .values()
            .filter(|m| include_inactive || m.is_active)
            .cloned()
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(methods)
    }
}

#[async_trait]
impl PeriodLedger for InMemoryStore {
    async fn find_periods_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MembershipPeriod>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .periods
            .iter()
            .filter(|p| p.member_id == *member_id)
            .map(|p| {
                // Mirror the SQL join: a link survives only while its transaction does.
                let mut period = p.clone();
                period.payment = p.payment.and_then(|link| {
                    tables
                        .transactions
                        .iter()
                        .find(|t| t.id == link.transaction_id)
                        .map(|t| PaymentLink {
                            transaction_id: t.id,
                            amount: t.amount,
                        })
                });
                period
            })
            .collect())
    }
}

#[async_trait]
impl LedgerWriter for InMemoryStore {
    async fn commit(&self, write: LedgerWrite) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.check_ledger_write(&write)?;

        let member_id = write.member_id();
        if let Some(member) = write.new_member {
            tables.members.insert(member.id, member);
        }
        if let Some(transaction) = write.transaction {
            tables.transactions.push(transaction);
        }
        tables.periods.push(write.period);
        if let Some(check_in) = write.check_in {
            tables.check_ins.push(check_in);
        }
        if let Some(member) = tables.members.get_mut(&member_id) {
            member.apply_cache(&write.cache, write.recorded_at);
        }
        Ok(())
    }
}

#[async_trait]
impl CheckInRepository for InMemoryStore {
    async fn record(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.members.contains_key(&check_in.member_id) {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        tables.check_ins.push(check_in.clone());
        Ok(())
    }

    async fn list_by_member(&self, member_id: &MemberId, limit: u32) -> Result<Vec<CheckIn>, DomainError> {
        let tables = self.tables.read().await;
        let mut visits: Vec<CheckIn> = tables
            .check_ins
            .iter()
            .filter(|c| c.member_id == *member_id)
            .cloned()
            .collect();
        visits.sort_by(|a, b| b.checked_in_at.cmp(&a.checked_in_at));
        visits.truncate(limit as usize);
        Ok(visits)
    }
}

#[async_trait]
impl TransactionReader for InMemoryStore {
    async fn list_between(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Transaction>, DomainError> {
        let tables = self.tables.read().await;
        let mut found: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|t| !t.occurred_at.is_before(&from) && t.occurred_at.is_before(&to))
            .cloned()
            .collect();
        found.sort_by_key(|t| t.occurred_at);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CheckInId, Money, PeriodId, TransactionId};
    use crate::domain::membership::{
        MemberCache, NewMemberProfile, NewPackage, PackageDuration, PeriodBounds,
        DAY_PASS_PACKAGE_NAME,
    };

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn member(name: &str, phone: Option<&str>) -> Member {
        Member::register(
            MemberId::new(),
            NewMemberProfile {
                name: name.to_string(),
                phone: phone.map(str::to_string),
                email: None,
                notes: None,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    fn package(name: &str, duration: PackageDuration) -> MembershipPackage {
        MembershipPackage::create(
            PackageId::new(),
            NewPackage {
                name: name.to_string(),
                duration,
                price: Money::from_minor_units(150_000),
                description: None,
            },
            DAY_PASS_PACKAGE_NAME,
            Timestamp::now(),
        )
        .unwrap()
    }

    fn sale(member: &Member, package: &MembershipPackage, at: &str) -> LedgerWrite {
        let tx = Transaction::record_sale(
            TransactionId::new(),
            member.id,
            package,
            None,
            None,
            ts(at),
            None,
        );
        let period = MembershipPeriod::open(
            PeriodId::new(),
            member.id,
            PeriodBounds {
                start: ts(at),
                end: ts(at).add_days(30),
            },
            &package.name,
            package.duration,
            Some(tx.link()),
            ts(at),
        )
        .unwrap();
        let cache = MemberCache::from_ledger(std::slice::from_ref(&period));
        LedgerWrite::period(period, cache, ts(at)).with_transaction(tx)
    }

    #[tokio::test]
    async fn commit_creates_member_and_resyncs_cache() {
        let store = InMemoryStore::new();
        let ana = member("Ana", Some("0812"));
        let monthly = package("Monthly", PackageDuration::Months(1));

        store
            .commit(sale(&ana, &monthly, "2024-01-01T10:00:00Z").with_new_member(ana.clone()))
            .await
            .unwrap();

        let stored = MemberRepository::find_by_id(&store, &ana.id).await.unwrap().unwrap();
        assert_eq!(stored.membership_type.as_deref(), Some("Monthly"));
        assert_eq!(stored.end_date, Some(ts("2024-01-31T10:00:00Z")));

        let periods = store.find_periods_by_member(&ana.id).await.unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].paid_amount().minor_units(), 150_000);
    }

    #[tokio::test]
    async fn rejected_commit_writes_nothing() {
        let store = InMemoryStore::new();
        let ghost = member("Ghost", None);
        let monthly = package("Monthly", PackageDuration::Months(1));

        let result = store.commit(sale(&ghost, &monthly, "2024-01-01T10:00:00Z")).await;

        assert!(matches!(result, Err(ref e) if e.code == ErrorCode::MemberNotFound));
        assert_eq!(store.transaction_count().await, 0);
        assert_eq!(store.period_count().await, 0);
    }

    #[tokio::test]
    async fn delete_cascades_periods_and_keeps_transactions() {
        let store = InMemoryStore::new();
        let ana = member("Ana", None);
        let monthly = package("Monthly", PackageDuration::Months(1));
        store
            .commit(sale(&ana, &monthly, "2024-01-01T10:00:00Z").with_new_member(ana.clone()))
            .await
            .unwrap();
        store
            .record(&CheckIn {
                id: CheckInId::new(),
                member_id: ana.id,
                checked_in_at: ts("2024-01-02T08:00:00Z"),
                period_id: None,
            })
            .await
            .unwrap();

        assert!(MemberRepository::delete(&store, &ana.id).await.unwrap());

        assert_eq!(store.period_count().await, 0);
        assert!(store.list_by_member(&ana.id, 10).await.unwrap().is_empty());
        let txs = store
            .list_between(ts("2024-01-01T00:00:00Z"), ts("2024-02-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].member_id, None);
    }

    #[tokio::test]
    async fn only_one_active_day_pass() {
        let store = InMemoryStore::new();
        PackageRepository::save(&store, &package(DAY_PASS_PACKAGE_NAME, PackageDuration::DayPass))
            .await
            .unwrap();

        let second =
            PackageRepository::save(&store, &package(DAY_PASS_PACKAGE_NAME, PackageDuration::DayPass)).await;

        assert!(matches!(second, Err(ref e) if e.code == ErrorCode::DuplicateDayPass));
        let found = store.find_active_by_name("day pass").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn search_matches_name_phone_and_email_case_insensitively() {
        let store = InMemoryStore::new();
        let monthly = package("Monthly", PackageDuration::Months(1));
        for (name, phone) in [("Ana Lima", "0812"), ("Bruno", "0999"), ("Carla", "0812-77")] {
            let m = member(name, Some(phone));
            store
                .commit(sale(&m, &monthly, "2024-01-01T10:00:00Z").with_new_member(m.clone()))
                .await
                .unwrap();
        }

        let by_name = MemberReader::list(&store, &MemberQuery::new(Some("ANA".to_string()), None, None))
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);

        let by_phone = MemberReader::list(&store, &MemberQuery::new(Some("0812".to_string()), None, Some(1)))
            .await
            .unwrap();
        assert_eq!(by_phone.total, 2);
        assert_eq!(by_phone.items.len(), 1);
    }

    #[tokio::test]
    async fn list_between_is_half_open() {
        let store = InMemoryStore::new();
        let ana = member("Ana", None);
        let monthly = package("Monthly", PackageDuration::Months(1));
        store
            .commit(sale(&ana, &monthly, "2024-02-01T00:00:00Z").with_new_member(ana.clone()))
            .await
            .unwrap();

        let january = store
            .list_between(ts("2024-01-01T00:00:00Z"), ts("2024-02-01T00:00:00Z"))
            .await
            .unwrap();
        assert!(january.is_empty());

        let february = store
            .list_between(ts("2024-02-01T00:00:00Z"), ts("2024-03-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(february.len(), 1);
    }
}
