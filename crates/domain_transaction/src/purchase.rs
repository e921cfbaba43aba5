//! Purchase order form

use rust_decimal::Decimal;
use tracing::{info, instrument};

use core_kernel::ClientId;
use domain_fund::{estimate_units, PaymentMode, PurchaseRequest, Scheme, SipFrequency, Transaction};

use crate::error::SubmitError;
use crate::form::settle;
use crate::ports::BrokeragePort;
use crate::validation::{parse_decimal, validate_purchase_amount, Field, FieldErrors};

/// State of a purchase form for one client and scheme
#[derive(Debug)]
pub struct PurchaseForm {
    client_id: ClientId,
    scheme: Scheme,
    amount: String,
    payment_mode: PaymentMode,
    sip: bool,
    sip_frequency: SipFrequency,
    errors: FieldErrors,
}

impl PurchaseForm {
    pub fn new(client_id: ClientId, scheme: Scheme) -> Self {
        Self {
            client_id,
            scheme,
            amount: String::new(),
            payment_mode: PaymentMode::default(),
            sip: false,
            sip_frequency: SipFrequency::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Updates the amount and clears its error
    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.amount = value.into();
        self.errors.clear(Field::Amount);
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        self.payment_mode = mode;
    }

    pub fn is_sip(&self) -> bool {
        self.sip
    }

    pub fn set_sip(&mut self, enabled: bool) {
        self.sip = enabled;
    }

    pub fn sip_frequency(&self) -> SipFrequency {
        self.sip_frequency
    }

    pub fn set_sip_frequency(&mut self, frequency: SipFrequency) {
        self.sip_frequency = frequency;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Units the typed amount buys at the scheme's NAV
    pub fn estimated_units(&self) -> Option<Decimal> {
        parse_decimal(&self.amount).and_then(|amount| estimate_units(amount, self.scheme.nav))
    }

    /// Validates the form and builds the request, recording any errors
    pub fn prepare(&mut self) -> Result<PurchaseRequest, SubmitError> {
        self.errors.clear_all();
        match validate_purchase_amount(&self.amount, &self.scheme) {
            Ok(amount) => Ok(PurchaseRequest::new(
                self.client_id.clone(),
                self.scheme.scheme_code.clone(),
                amount,
                self.payment_mode,
                self.sip.then_some(self.sip_frequency),
            )),
            Err(error) => {
                info!(scheme_code = %self.scheme.scheme_code, code = ?error.code, "Purchase rejected locally");
                self.errors.insert(Field::Amount, error);
                Err(SubmitError::Validation(self.errors.clone()))
            }
        }
    }

    /// Validates and, if valid, places the order
    #[instrument(skip(self, port), fields(client_id = %self.client_id, scheme_code = %self.scheme.scheme_code))]
    pub async fn submit(&mut self, port: &dyn BrokeragePort) -> Result<Transaction, SubmitError> {
        let request = self.prepare()?;
        let envelope = port.purchase(&request).await;
        settle(envelope, &mut self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::{MockBrokeragePort, Submission};
    use crate::testing::scheme;
    use crate::validation::ValidationCode;
    use rust_decimal_macros::dec;

    fn form() -> PurchaseForm {
        PurchaseForm::new(ClientId::new("CL001"), scheme("S1"))
    }

    #[test]
    fn test_estimated_units() {
        let mut form = form();
        form.set_amount("1000");
        assert_eq!(form.estimated_units().map(|u| domain_fund::format_fixed(u, 4)), Some("40.0000".to_string()));
        form.set_amount("");
        assert_eq!(form.estimated_units(), None);
    }

    #[tokio::test]
    async fn test_oversized_amount_has_no_estimate() {
        let port = MockBrokeragePort::new();
        let mut cheap = scheme("S1");
        cheap.nav = dec!(0.5);
        let mut form = PurchaseForm::new(ClientId::new("CL001"), cheap);
        form.set_amount(Decimal::MAX.to_string());

        let result = form.submit(&port).await;
        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(form.errors().code(Field::Amount), Some(ValidationCode::AmountOutOfRange));
        assert_eq!(form.estimated_units(), None);
        assert!(port.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_below_minimum_never_calls_port() {
        let port = MockBrokeragePort::new();
        let mut form = form();
        form.set_amount("100");

        let result = form.submit(&port).await;

        let errors = result.unwrap_err().field_errors().cloned().unwrap();
        assert_eq!(errors.message(Field::Amount), Some("Minimum amount is ₹500"));
        assert_eq!(errors.code(Field::Amount), Some(ValidationCode::AmountOutOfRange));
        assert_eq!(port.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_editing_clears_field_error() {
        let port = MockBrokeragePort::new();
        let mut form = form();
        form.set_amount("abc");
        let _ = form.submit(&port).await;
        assert!(form.errors().get(Field::Amount).is_some());

        form.set_amount("1000");
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_sip_order_carries_frequency() {
        let port = MockBrokeragePort::new();
        let mut form = form();
        form.set_amount("5000");
        form.set_payment_mode(PaymentMode::Upi);
        form.set_sip(true);
        form.set_sip_frequency(SipFrequency::Quarterly);

        let transaction = form.submit(&port).await.unwrap();
        assert_eq!(transaction.amount, Some(dec!(5000)));

        let submissions = port.submissions().await;
        let Submission::Purchase(request) = &submissions[0] else {
            panic!("expected a purchase");
        };
        assert_eq!(request.payment_mode(), PaymentMode::Upi);
        assert_eq!(request.sip_frequency(), Some(SipFrequency::Quarterly));
    }

    #[tokio::test]
    async fn test_rejection_becomes_general_error() {
        let port = MockBrokeragePort::new();
        port.reject_orders("Scheme suspended for fresh purchases", Some("SCHEME_SUSPENDED")).await;
        let mut form = form();
        form.set_amount("1000");

        let result = form.submit(&port).await;

        assert!(matches!(result, Err(SubmitError::Rejected(ref f)) if f.error_code.as_deref() == Some("SCHEME_SUSPENDED")));
        assert_eq!(
            form.errors().message(Field::General),
            Some("Scheme suspended for fresh purchases")
        );
        assert_eq!(port.submissions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_offline_surfaces_network_error() {
        let port = MockBrokeragePort::new();
        port.set_offline(true).await;
        let mut form = form();
        form.set_amount("1000");

        let _ = form.submit(&port).await;
        assert_eq!(form.errors().message(Field::General), Some("Network error occurred"));
    }
}
