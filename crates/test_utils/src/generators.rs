//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{ClientId, OrderNumber, SchemeCode, TransactionId};
use domain_fund::{Holding, Scheme, Transaction, TransactionStatus, TransactionType};

use crate::builders::SchemeBuilder;
use crate::fixtures::TransactionFixtures;

/// Strategy for transaction types
pub fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
    prop::sample::select(TransactionType::ALL.to_vec())
}

/// Strategy for transaction statuses
pub fn transaction_status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop::sample::select(TransactionStatus::ALL.to_vec())
}

/// Strategy for scheme codes drawn from a small pool, so searches hit
pub fn scheme_code_strategy() -> impl Strategy<Value = SchemeCode> {
    prop::sample::select(vec!["AXIS001", "HDFC002", "ICICI003", "SBI004"]).prop_map(SchemeCode::new)
}

/// Strategy for positive amounts with up to two decimals
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for positive unit counts with up to four decimals
pub fn units_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for positive NAVs between 1 and 10000
pub fn nav_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for schemes whose bounds satisfy min ≤ max
pub fn scheme_strategy() -> impl Strategy<Value = Scheme> {
    (scheme_code_strategy(), nav_strategy(), 1i64..10_000i64, 0i64..1_000_000i64).prop_map(
        |(code, nav, min, spread)| {
            SchemeBuilder::new()
                .with_code(code.as_str())
                .with_nav(nav)
                .with_bounds(Decimal::from(min), Decimal::from(min + spread))
                .build()
        },
    )
}

/// Strategy for holdings valued at their own NAV
pub fn holding_strategy() -> impl Strategy<Value = Holding> {
    (scheme_code_strategy(), units_strategy(), amount_strategy(), nav_strategy())
        .prop_map(|(code, units, invested, nav)| Holding::new(code, "Generated Fund", units, invested, nav))
}

/// Strategy for transactions up to 200 days before the fixture reference time
pub fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        0u32..100_000,
        transaction_type_strategy(),
        transaction_status_strategy(),
        scheme_code_strategy(),
        0i64..200 * 24,
        prop::option::of(amount_strategy()),
    )
        .prop_map(|(id, transaction_type, status, scheme_code, age_hours, amount)| Transaction {
            id: TransactionId::new(format!("TXN{}", id)),
            client_id: ClientId::new("CL001"),
            transaction_type,
            scheme_code,
            amount,
            units: None,
            status,
            order_number: Some(OrderNumber::new(format!("ORD{}", id))),
            timestamp: TransactionFixtures::reference_now() - Duration::hours(age_hours),
            remarks: None,
        })
}

/// Strategy for transaction lists
pub fn history_strategy(max: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction_strategy(), 0..max)
}
