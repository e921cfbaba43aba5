//! Integration tests for the order desk domain

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ApiResponse, ClientId, OrderNumber, SchemeCode, TransactionId};
use domain_fund::{RiskLevel, Scheme, Transaction, TransactionStatus, TransactionType};
use domain_transaction::history::{search_matches, status_matches, type_matches, window_matches};
use domain_transaction::validation::{parse_decimal, validate_purchase_amount};
use domain_transaction::{
    Choice, DateWindow, Field, FieldErrors, HistoryFilter, HistoryView, Picker, PickerState,
    PurchaseForm, SubmitError, ValidationCode,
};

fn scheme() -> Scheme {
    Scheme {
        scheme_code: SchemeCode::new("AXIS001"),
        scheme_name: "Axis Bluechip Fund".to_string(),
        amc_code: "AXIS".to_string(),
        amc_name: "Axis Mutual Fund".to_string(),
        nav: dec!(25),
        min_amount: dec!(500),
        max_amount: dec!(100000),
        category: "Large Cap".to_string(),
        risk_level: RiskLevel::Moderate,
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
}

fn transaction(
    id: u32,
    kind: TransactionType,
    status: TransactionStatus,
    scheme: &str,
    age_hours: i64,
) -> Transaction {
    Transaction {
        id: TransactionId::new(format!("TXN{:04}", id)),
        client_id: ClientId::new("CL001"),
        transaction_type: kind,
        scheme_code: SchemeCode::new(scheme),
        amount: Some(dec!(1000)),
        units: None,
        status,
        order_number: Some(OrderNumber::new(format!("ORD{:04}", id))),
        timestamp: now() - Duration::hours(age_hours),
        remarks: None,
    }
}

// ============================================================================
// Purchase Form Tests
// ============================================================================

mod purchase_form_tests {
    use super::*;

    #[test]
    fn test_reference_estimate() {
        let mut form = PurchaseForm::new(ClientId::new("CL001"), scheme());
        form.set_amount("1000");
        let units = form.estimated_units().unwrap();
        assert_eq!(domain_fund::format_fixed(units, 4), "40.0000");
    }

    #[test]
    fn test_reference_minimum_message() {
        let mut form = PurchaseForm::new(ClientId::new("CL001"), scheme());
        form.set_amount("100");
        let error = form.prepare().unwrap_err();
        let errors = error.field_errors().unwrap();
        assert_eq!(errors.message(Field::Amount), Some("Minimum amount is ₹500"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(validate_purchase_amount("500", &scheme()), Ok(dec!(500)));
        assert_eq!(validate_purchase_amount("100000", &scheme()), Ok(dec!(100000)));
    }

    #[test]
    fn test_request_omits_frequency_without_sip() {
        let mut form = PurchaseForm::new(ClientId::new("CL001"), scheme());
        form.set_amount("2500");
        form.set_sip_frequency(domain_fund::SipFrequency::Yearly);
        let request = form.prepare().unwrap();
        assert_eq!(request.sip_frequency(), None);
        assert_eq!(request.amount(), dec!(2500));
    }

    #[test]
    fn test_malformed_amounts() {
        for input in ["", "   ", "1,000", "ten", "12abc"] {
            let mut form = PurchaseForm::new(ClientId::new("CL001"), scheme());
            form.set_amount(input);
            let Err(SubmitError::Validation(errors)) = form.prepare() else {
                panic!("{input:?} should be rejected");
            };
            assert_eq!(errors.code(Field::Amount), Some(ValidationCode::InvalidAmount));
        }
    }

    proptest! {
        #[test]
        fn out_of_range_amounts_are_rejected(cents in 1i64..10_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let result = validate_purchase_amount(&amount.to_string(), &scheme());
            if amount < dec!(500) || amount > dec!(100000) {
                let error = result.unwrap_err();
                prop_assert_eq!(error.code, Some(ValidationCode::AmountOutOfRange));
            } else {
                prop_assert_eq!(result, Ok(amount));
            }
        }

        #[test]
        fn parse_ignores_surrounding_whitespace(value in -1_000_000i64..1_000_000i64, pad in 0usize..4) {
            let text = format!("{}{}{}", " ".repeat(pad), value, "\t".repeat(pad));
            prop_assert_eq!(parse_decimal(&text), Some(Decimal::from(value)));
        }
    }
}

// ============================================================================
// Field Error Tests
// ============================================================================

mod field_error_tests {
    use super::*;
    use domain_transaction::FieldError;

    #[test]
    fn test_one_error_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Amount, FieldError::plain("first"));
        errors.insert(Field::Amount, FieldError::plain("second"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(Field::Amount), Some("second"));
    }

    #[test]
    fn test_codes_render_upper_snake() {
        assert_eq!(ValidationCode::AmountExceedsHolding.to_string(), "AMOUNT_EXCEEDS_HOLDING");
        assert_eq!(ValidationCode::UnitsExceedHolding.as_str(), "UNITS_EXCEED_HOLDING");
    }
}

// ============================================================================
// History Filter Tests
// ============================================================================

mod history_filter_tests {
    use super::*;

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(1, TransactionType::Purchase, TransactionStatus::Success, "AXIS001", 2),
            transaction(2, TransactionType::Redeem, TransactionStatus::Pending, "HDFC002", 24 * 10),
            transaction(3, TransactionType::Switch, TransactionStatus::Failed, "AXIS001", 24 * 45),
            transaction(4, TransactionType::Purchase, TransactionStatus::Cancelled, "ICICI003", 24 * 120),
        ]
    }

    fn ids(transactions: &[&Transaction]) -> Vec<String> {
        transactions.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_default_window_is_thirty_days() {
        let filter = HistoryFilter::default();
        let data = sample();
        assert_eq!(ids(&filter.apply(&data, now())), vec!["TXN0001", "TXN0002"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let data = sample();
        let filter = HistoryFilter {
            kind: Choice::Only(TransactionType::Purchase),
            status: Choice::All,
            search: "axis".to_string(),
            window: DateWindow::All,
        };
        assert_eq!(ids(&filter.apply(&data, now())), vec!["TXN0001"]);
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            DateWindow::PRESETS.map(|w| w.to_string()),
            ["7", "30", "90", "ALL"].map(String::from)
        );
    }

    #[test]
    fn test_history_view_visible() {
        let mut view = HistoryView::new(ClientId::new("CL001"));
        let ticket = view.begin_fetch();
        view.complete_fetch(ticket, ApiResponse::ok(sample(), ""));
        view.filter_mut().window = DateWindow::Days(90);
        view.filter_mut().status = Choice::Only(TransactionStatus::Failed);
        assert_eq!(ids(&view.visible(now())), vec!["TXN0003"]);
        assert!(view.filter().has_active_filters());
    }

    fn arb_type() -> impl Strategy<Value = TransactionType> {
        prop::sample::select(TransactionType::ALL.to_vec())
    }

    fn arb_status() -> impl Strategy<Value = TransactionStatus> {
        prop::sample::select(TransactionStatus::ALL.to_vec())
    }

    fn arb_transaction() -> impl Strategy<Value = Transaction> {
        (
            0u32..10_000,
            arb_type(),
            arb_status(),
            prop::sample::select(vec!["AXIS001", "HDFC002", "ICICI003"]),
            0i64..24 * 200,
        )
            .prop_map(|(id, kind, status, scheme, age)| transaction(id, kind, status, scheme, age))
    }

    fn arb_filter() -> impl Strategy<Value = HistoryFilter> {
        (
            prop_oneof![Just(Choice::All), arb_type().prop_map(Choice::Only)],
            prop_oneof![Just(Choice::All), arb_status().prop_map(Choice::Only)],
            prop::sample::select(vec!["", "axis", "ORD00", "hdfc", "zzz"]),
            prop::sample::select(DateWindow::PRESETS.to_vec()),
        )
            .prop_map(|(kind, status, search, window)| HistoryFilter {
                kind,
                status,
                search: search.to_string(),
                window,
            })
    }

    type Predicate = Box<dyn Fn(&Transaction) -> bool>;

    fn predicates(filter: &HistoryFilter) -> Vec<Predicate> {
        let (kind, status, search, window) =
            (filter.kind, filter.status, filter.search.clone(), filter.window);
        vec![
            Box::new(move |t: &Transaction| type_matches(kind, t)),
            Box::new(move |t: &Transaction| status_matches(status, t)),
            Box::new(move |t: &Transaction| search_matches(&search, t)),
            Box::new(move |t: &Transaction| window_matches(window, t, now())),
        ]
    }

    fn run(data: &[Transaction], order: &[usize], predicates: &[Predicate]) -> Vec<String> {
        let mut current: Vec<&Transaction> = data.iter().collect();
        for &i in order {
            current.retain(|t| (predicates[i])(*t));
        }
        ids(&current)
    }

    proptest! {
        #[test]
        fn filters_are_commutative(
            data in prop::collection::vec(arb_transaction(), 0..30),
            filter in arb_filter(),
            order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        ) {
            let preds = predicates(&filter);
            let combined = ids(&filter.apply(&data, now()));
            prop_assert_eq!(run(&data, &order, &preds), combined);
        }

        #[test]
        fn filters_are_idempotent(
            data in prop::collection::vec(arb_transaction(), 0..30),
            filter in arb_filter(),
        ) {
            let once: Vec<Transaction> = filter.apply(&data, now()).into_iter().cloned().collect();
            let twice = ids(&filter.apply(&once, now()));
            prop_assert_eq!(twice, ids(&once.iter().collect::<Vec<_>>()));
        }
    }
}

// ============================================================================
// Picker Tests
// ============================================================================

mod picker_tests {
    use super::*;

    fn loaded(schemes: Vec<Scheme>) -> Picker<Scheme> {
        let mut picker = Picker::new();
        let ticket = picker.begin_fetch().unwrap();
        picker.complete_fetch(ticket, ApiResponse::ok(schemes, ""));
        picker
    }

    #[test]
    fn test_scheme_search_fields() {
        let mut other = scheme();
        other.scheme_code = SchemeCode::new("HDFC002");
        other.scheme_name = "HDFC Mid-Cap Opportunities".to_string();
        other.amc_name = "HDFC Mutual Fund".to_string();
        other.category = "Mid Cap".to_string();
        let mut picker = loaded(vec![scheme(), other]);

        picker.set_search("large");
        assert_eq!(picker.visible().len(), 1);
        picker.set_search("MUTUAL");
        assert_eq!(picker.visible().len(), 2);
        picker.set_search("");
        assert_eq!(picker.visible().len(), 2);
    }

    #[test]
    fn test_failure_message_is_kept() {
        let mut picker: Picker<Scheme> = Picker::new();
        let ticket = picker.begin_fetch().unwrap();
        picker.complete_fetch(ticket, ApiResponse::failure("Service unavailable", None));
        assert_eq!(picker.state(), &PickerState::Failed("Service unavailable".to_string()));
        assert!(picker.visible().is_empty());
        assert!(!picker.is_empty_result());
    }
}
