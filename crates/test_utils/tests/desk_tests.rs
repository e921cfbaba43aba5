//! Forms and views driven against the fixture desk

use core_kernel::ClientId;
use domain_fund::OrderMode;
use domain_transaction::{
    BrokeragePort, Field, PurchaseForm, RedeemForm, SwitchForm, ValidationCode, Workflow,
};
use test_utils::assertions::*;
use test_utils::builders::{ClientBuilder, MockPortBuilder};
use test_utils::fixtures::{ClientFixtures, PortFixtures, SchemeFixtures};

// ============================================================================
// Fixture Desk Tests
// ============================================================================

mod fixture_desk_tests {
    use super::*;

    #[tokio::test]
    async fn test_desk_lists_fixtures() {
        let port = PortFixtures::desk().await;
        let schemes = assert_success(port.list_schemes().await);
        assert_eq!(schemes.len(), 3);
        let portfolio = assert_success(port.portfolio(&ClientId::new("CL001")).await);
        assert_eq!(portfolio.holdings().len(), 2);
    }

    #[tokio::test]
    async fn test_offline_desk() {
        let port = MockPortBuilder::new().offline().build().await;
        assert_network_error(&port.list_clients().await);
    }
}

// ============================================================================
// Form Tests
// ============================================================================

mod form_tests {
    use super::*;

    #[tokio::test]
    async fn test_purchase_above_maximum() {
        let port = PortFixtures::desk().await;
        let mut form = PurchaseForm::new(ClientId::new("CL001"), SchemeFixtures::axis_bluechip());
        form.set_amount("100001");
        let errors = assert_validation_failure(form.submit(&port).await);
        assert_field_error(
            &errors,
            Field::Amount,
            ValidationCode::AmountOutOfRange,
            "Maximum amount is ₹100000",
        );
        assert_no_orders(&port).await;
    }

    #[tokio::test]
    async fn test_redeem_amount_above_value() {
        let port = PortFixtures::desk().await;
        let mut form = RedeemForm::new(ClientId::new("CL001"), SchemeFixtures::axis_bluechip());
        form.load_holding(&port).await;
        form.set_mode(OrderMode::Amount);
        form.set_amount("3000.01");
        let errors = assert_validation_failure(form.submit(&port).await);
        assert_field_error(
            &errors,
            Field::Amount,
            ValidationCode::AmountExceedsHolding,
            "Available amount is ₹3000.00",
        );
        assert_no_orders(&port).await;
    }

    #[tokio::test]
    async fn test_switch_units_not_numeric() {
        let port = PortFixtures::desk().await;
        let mut form = SwitchForm::new(
            ClientId::new("CL001"),
            SchemeFixtures::axis_bluechip(),
            SchemeFixtures::hdfc_midcap(),
        );
        form.load_holding(&port).await;
        form.set_mode(OrderMode::Units);
        form.set_units("ten");
        let errors = assert_validation_failure(form.submit(&port).await);
        assert_field_error(&errors, Field::Units, ValidationCode::InvalidUnits, "Please enter valid units");
    }
}

// ============================================================================
// Workflow Tests
// ============================================================================

mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_history_through_workflow() {
        let port = PortFixtures::desk().await;
        let mut workflow = Workflow::new();
        workflow.select_client(ClientFixtures::verified()).unwrap();
        let mut view = workflow.open_history().unwrap();
        view.load(&port).await;
        assert_eq!(view.transactions().len(), 5);
        workflow.close_history().unwrap();
    }

    #[test]
    fn test_random_client_gate() {
        let mut workflow = Workflow::new();
        workflow
            .select_client(ClientBuilder::random().with_kyc(domain_client::KycStatus::Rejected).build())
            .unwrap();
        workflow.select_scheme(SchemeFixtures::icici_liquid()).unwrap();
        assert!(!workflow.can_proceed());
        assert!(workflow.kyc_warning().is_some());
    }
}
