//! Fixtures shared by handler tests.

use std::sync::Arc;

use crate::adapters::{FixedClock, InMemoryStore};
use crate::domain::foundation::{MemberId, Money, PackageId, PaymentMethodId, PeriodId, Timestamp};
use crate::domain::membership::{
    Member, MemberCache, MembershipPackage, MembershipPeriod, MembershipRules, NewMemberProfile,
    NewPackage, PackageDuration, PaymentMethod, PeriodBounds, DAY_PASS_PACKAGE_NAME,
};
use crate::ports::{
    LedgerWrite, LedgerWriter, MemberRepository, PackageRepository, PaymentMethodRepository,
    PeriodLedger,
};

pub(crate) fn ts(s: &str) -> Timestamp {
    Timestamp::parse_rfc3339(s).unwrap()
}

/// Store seeded with a monthly plan, a quarterly plan, the Day Pass and one
/// payment method.
pub(crate) struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
    pub rules: MembershipRules,
    pub monthly: MembershipPackage,
    pub quarterly: MembershipPackage,
    pub day_pass: MembershipPackage,
    pub cash: PaymentMethod,
}

impl Fixture {
    pub async fn at(now: &str) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::at(ts(now)));
        let rules = MembershipRules::default();

        let monthly = seed_package(&store, "Monthly", PackageDuration::Months(1), 150_000).await;
        let quarterly = seed_package(&store, "Quarterly", PackageDuration::Months(3), 400_000).await;
        let day_pass = seed_package(&store, DAY_PASS_PACKAGE_NAME, PackageDuration::DayPass, 25_000).await;

        let cash = PaymentMethod::create(PaymentMethodId::new(), "Cash", ts(now)).unwrap();
        PaymentMethodRepository::save(store.as_ref(), &cash).await.unwrap();

        Self {
            store,
            clock,
            rules,
            monthly,
            quarterly,
            day_pass,
            cash,
        }
    }
}

impl Fixture {
    /// Registers a member with no periods.
    pub async fn register(&self, name: &str, phone: Option<&str>) -> Member {
        let member = Member::register(
            MemberId::new(),
            NewMemberProfile {
                name: name.to_string(),
                phone: phone.map(str::to_string),
                email: None,
                notes: None,
            },
            ts("2023-12-01T00:00:00Z"),
        )
        .unwrap();
        MemberRepository::save(self.store.as_ref(), &member).await.unwrap();
        member
    }

    /// Appends an unpaid period with explicit bounds.
    pub async fn grant(&self, package: &MembershipPackage, member_id: MemberId, start: &str, end: &str) -> MembershipPeriod {
        let period = MembershipPeriod::open(
            PeriodId::new(),
            member_id,
            PeriodBounds {
                start: ts(start),
                end: ts(end),
            },
            package.name.clone(),
            package.duration,
            None,
            ts(start),
        )
        .unwrap();
        let mut ledger = self.store.find_periods_by_member(&member_id).await.unwrap();
        ledger.push(period.clone());
        let cache = MemberCache::from_ledger(&ledger);
        self.store
            .commit(LedgerWrite::period(period.clone(), cache, ts(start)))
            .await
            .unwrap();
        period
    }
}

async fn seed_package(
    store: &InMemoryStore,
    name: &str,
    duration: PackageDuration,
    price: i64,
) -> MembershipPackage {
    let package = MembershipPackage::create(
        PackageId::new(),
        NewPackage {
            name: name.to_string(),
            duration,
            price: Money::from_minor_units(price),
            description: None,
        },
        DAY_PASS_PACKAGE_NAME,
        ts("2023-01-01T00:00:00Z"),
    )
    .unwrap();
    PackageRepository::save(store, &package).await.unwrap();
    package
}
