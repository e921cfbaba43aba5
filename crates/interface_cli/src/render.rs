//! Plain-text rendering of desk data

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use domain_client::Client;
use domain_fund::{
    format_fixed, Holding, Portfolio, Scheme, Transaction, CURRENCY_PRECISION, UNIT_DISPLAY_PRECISION,
};
use domain_transaction::FieldErrors;

pub fn rupees(value: Decimal) -> String {
    format!("₹{}", format_fixed(value, CURRENCY_PRECISION))
}

pub fn units(value: Decimal) -> String {
    format_fixed(value, UNIT_DISPLAY_PRECISION)
}

pub fn clients(out: &mut dyn Write, clients: &[&Client]) -> io::Result<()> {
    if clients.is_empty() {
        return writeln!(out, "No clients found");
    }
    for client in clients {
        writeln!(
            out,
            "{:<8} {:<24} {:<10} {:<28} KYC {}  {} {}",
            client.id,
            client.name,
            client.pan_card,
            client.email,
            client.kyc_status,
            client.bank_details.bank_name,
            client.bank_details.masked_account_number(),
        )?;
    }
    Ok(())
}

pub fn schemes(out: &mut dyn Write, schemes: &[&Scheme]) -> io::Result<()> {
    if schemes.is_empty() {
        return writeln!(out, "No schemes found");
    }
    for scheme in schemes {
        writeln!(
            out,
            "{:<10} {:<36} NAV {:>10}  min {}  max {}  {} / {}",
            scheme.scheme_code,
            scheme.scheme_name,
            rupees(scheme.nav),
            rupees(scheme.min_amount),
            rupees(scheme.max_amount),
            scheme.category,
            scheme.risk_level,
        )?;
    }
    Ok(())
}

pub fn holding(out: &mut dyn Write, holding: &Holding) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<36} units {:>12}  value {:>14}  invested {:>14}  {} {} ({}%)",
        holding.scheme_code(),
        holding.scheme_name(),
        units(holding.units()),
        rupees(holding.current_value()),
        rupees(holding.invested_amount()),
        if holding.is_in_profit() { "gain" } else { "loss" },
        rupees(holding.gain_loss().abs()),
        format_fixed(holding.gain_loss_percentage(), 2),
    )
}

pub fn portfolio(out: &mut dyn Write, portfolio: &Portfolio) -> io::Result<()> {
    if portfolio.is_empty() {
        return writeln!(out, "No holdings");
    }
    for item in portfolio.holdings() {
        holding(out, item)?;
    }
    writeln!(
        out,
        "Total value {}  invested {}",
        rupees(portfolio.total_current_value()),
        rupees(portfolio.total_invested())
    )
}

fn quantity(transaction: &Transaction) -> String {
    match (transaction.amount, transaction.units) {
        (Some(amount), _) => rupees(amount),
        (None, Some(value)) => format!("{} units", units(value)),
        (None, None) => "ALL units".to_string(),
    }
}

pub fn transaction(out: &mut dyn Write, transaction: &Transaction) -> io::Result<()> {
    writeln!(
        out,
        "{:<12} {:<8} {:<10} {:<10} {:>16}  order {}  {}",
        transaction.id,
        transaction.transaction_type,
        transaction.status,
        transaction.scheme_code,
        quantity(transaction),
        transaction
            .order_number
            .as_ref()
            .map(|n| n.as_str())
            .unwrap_or("-"),
        transaction.timestamp.format("%Y-%m-%d %H:%M"),
    )
}

pub fn history(
    out: &mut dyn Write,
    transactions: &[&Transaction],
    filters_active: bool,
) -> io::Result<()> {
    if transactions.is_empty() {
        writeln!(out, "No transactions found")?;
        if filters_active {
            writeln!(out, "Try adjusting your filters")?;
        }
        return Ok(());
    }
    for item in transactions {
        transaction(out, item)?;
    }
    Ok(())
}

/// The SUCCESS view
pub fn success(out: &mut dyn Write, transaction: &Transaction, now: DateTime<Utc>) -> io::Result<()> {
    writeln!(out, "Order placed successfully")?;
    writeln!(out, "Transaction ID: {}", transaction.id)?;
    if let Some(order_number) = &transaction.order_number {
        writeln!(out, "Order number: {}", order_number)?;
    }
    writeln!(out, "Status: {}", transaction.status)?;
    writeln!(out, "Placed: {} day(s) ago", transaction.days_since(now).max(0))
}

pub fn field_errors(out: &mut dyn Write, errors: &FieldErrors) -> io::Result<()> {
    for (field, error) in errors.iter() {
        writeln!(out, "  {}: {}", field, error.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_formatting() {
        assert_eq!(rupees(dec!(1000)), "₹1000.00");
        assert_eq!(units(dec!(40)), "40.0000");
    }

    #[test]
    fn test_holding_shows_loss() {
        let at_loss = Holding::new("HDFC002".into(), "HDFC Mid-Cap", dec!(40), dec!(5000), dec!(112.5));
        let mut out = Vec::new();
        holding(&mut out, &at_loss).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("loss ₹500.00 (-10.00%)"), "{}", line);
    }
}
