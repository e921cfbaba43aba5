//! Subcommands and their execution against a brokerage port

use std::io::Write;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use core_kernel::{ClientId, TransactionId};
use domain_client::Client;
use domain_fund::{OrderMode, PaymentMode, Scheme, SipFrequency, TransactionStatus, TransactionType};
use domain_transaction::{
    BrokeragePort, Choice, ClientPicker, DateWindow, HistoryState, HoldingState, PickerState,
    SchemePicker, TransactionForm, Workflow,
};

use crate::error::CliError;
use crate::render;

#[derive(Debug, Parser)]
#[command(name = "mf-desk", version, about = "Mutual-fund transaction desk")]
pub struct Cli {
    /// Base URL of the order-routing API (overrides MF_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token (overrides MF_API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List clients
    Clients {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List schemes
    Schemes {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show a client's holdings
    Portfolio { client: String },
    /// Show a client's transactions
    History {
        client: String,
        /// PURCHASE, REDEEM, SWITCH or ALL
        #[arg(long = "type", default_value = "ALL")]
        kind: String,
        /// PENDING, SUCCESS, FAILED, CANCELLED or ALL
        #[arg(long, default_value = "ALL")]
        status: String,
        /// 7, 30, 90 or ALL
        #[arg(long, default_value = "30")]
        days: String,
        /// Matches scheme code or order number
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one transaction
    Status { transaction: String },
    /// Buy into a scheme
    Purchase {
        #[arg(long)]
        client: String,
        #[arg(long)]
        scheme: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "NETBANKING")]
        payment_mode: PaymentMode,
        /// Register as a systematic investment plan
        #[arg(long)]
        sip: bool,
        #[arg(long, default_value = "MONTHLY")]
        sip_frequency: SipFrequency,
    },
    /// Sell units of a held scheme
    Redeem {
        #[arg(long)]
        client: String,
        #[arg(long)]
        scheme: String,
        #[command(flatten)]
        quantity: QuantityArgs,
    },
    /// Move units from one scheme to another
    Switch {
        #[arg(long)]
        client: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[command(flatten)]
        quantity: QuantityArgs,
    },
}

/// Exactly one of amount, units or all
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct QuantityArgs {
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub units: Option<String>,
    /// Liquidate the whole holding
    #[arg(long)]
    pub all: bool,
}

impl QuantityArgs {
    fn mode(&self) -> OrderMode {
        if self.all {
            OrderMode::All
        } else if self.units.is_some() {
            OrderMode::Units
        } else {
            OrderMode::Amount
        }
    }
}

/// Runs one subcommand, writing its output to `out`
pub async fn run(command: Command, port: &dyn BrokeragePort, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Clients { search } => {
            let mut picker = ClientPicker::new();
            picker.load(port).await;
            picker.set_search(search);
            ready(picker.state())?;
            render::clients(out, &picker.visible())?;
        }
        Command::Schemes { search } => {
            let mut picker = SchemePicker::new();
            picker.load(port).await;
            picker.set_search(search);
            ready(picker.state())?;
            render::schemes(out, &picker.visible())?;
        }
        Command::Portfolio { client } => {
            let portfolio = port.portfolio(&ClientId::new(client)).await.into_result()?;
            render::portfolio(out, &portfolio)?;
        }
        Command::History { client, kind, status, days, search } => {
            history(port, out, client, &kind, &status, &days, search).await?;
        }
        Command::Status { transaction } => {
            let record = port
                .transaction_status(&TransactionId::new(transaction))
                .await
                .into_result()?;
            render::transaction(out, &record)?;
        }
        Command::Purchase { client, scheme, amount, payment_mode, sip, sip_frequency } => {
            let mut workflow = select(port, &client, &scheme, None, TransactionType::Purchase).await?;
            let mut form = workflow.begin_transaction()?;
            if let TransactionForm::Purchase(purchase) = &mut form {
                purchase.set_amount(amount);
                purchase.set_payment_mode(payment_mode);
                purchase.set_sip(sip);
                purchase.set_sip_frequency(sip_frequency);
                if let Some(estimate) = purchase.estimated_units() {
                    writeln!(out, "Estimated units: {}", render::units(estimate))?;
                }
            }
            place(&mut workflow, form, port, out).await?;
        }
        Command::Redeem { client, scheme, quantity } => {
            let mut workflow = select(port, &client, &scheme, None, TransactionType::Redeem).await?;
            let mut form = workflow.begin_transaction()?;
            form.mount(port).await;
            if let TransactionForm::Redeem(redeem) = &mut form {
                redeem.set_mode(quantity.mode());
                redeem.set_amount(quantity.amount.clone().unwrap_or_default());
                redeem.set_units(quantity.units.clone().unwrap_or_default());
                if let HoldingState::Loaded(holding) = redeem.holding_state() {
                    render::holding(out, holding)?;
                }
            }
            place(&mut workflow, form, port, out).await?;
        }
        Command::Switch { client, from, to, quantity } => {
            let mut workflow = select(port, &client, &from, Some(&to), TransactionType::Switch).await?;
            let mut form = workflow.begin_transaction()?;
            form.mount(port).await;
            if let TransactionForm::Switch(switch) = &mut form {
                switch.set_mode(quantity.mode());
                switch.set_amount(quantity.amount.clone().unwrap_or_default());
                switch.set_units(quantity.units.clone().unwrap_or_default());
                if let Some(estimate) = switch.estimated_target_units() {
                    writeln!(out, "Estimated units in {}: {}", to, render::units(estimate))?;
                }
            }
            place(&mut workflow, form, port, out).await?;
        }
    }
    Ok(())
}

fn ready<T>(state: &PickerState<T>) -> Result<(), CliError> {
    match state {
        PickerState::Failed(message) => Err(CliError::Remote(message.clone())),
        _ => Ok(()),
    }
}

/// Drives SELECTION: pick the client and schemes, then check the KYC gate
async fn select(
    port: &dyn BrokeragePort,
    client_id: &str,
    scheme_code: &str,
    target_code: Option<&str>,
    transaction_type: TransactionType,
) -> Result<Workflow, CliError> {
    let mut clients = ClientPicker::new();
    clients.load(port).await;
    ready(clients.state())?;
    let client: Client = clients.select(client_id).ok_or_else(|| CliError::NotFound {
        kind: "Client",
        key: client_id.to_string(),
    })?;

    let mut schemes = SchemePicker::new();
    schemes.load(port).await;
    ready(schemes.state())?;
    let scheme: Scheme = find_scheme(&mut schemes, scheme_code)?;

    let mut workflow = Workflow::new();
    workflow.select_client(client)?;
    if let Some(warning) = workflow.kyc_warning() {
        warn!(client_id = %client_id, "{}", warning);
    }
    workflow.select_scheme(scheme)?;
    workflow.set_transaction_type(transaction_type)?;
    if let Some(target_code) = target_code {
        let target = find_scheme(&mut schemes, target_code)?;
        workflow.select_target_scheme(target)?;
    }
    Ok(workflow)
}

fn find_scheme(schemes: &mut SchemePicker, code: &str) -> Result<Scheme, CliError> {
    schemes.select(code).ok_or_else(|| CliError::NotFound {
        kind: "Scheme",
        key: code.to_string(),
    })
}

/// Submits the form and moves the workflow to SUCCESS
async fn place(
    workflow: &mut Workflow,
    mut form: TransactionForm,
    port: &dyn BrokeragePort,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match form.submit(port).await {
        Ok(transaction) => {
            workflow.complete(transaction)?;
            if let Some(placed) = workflow.completed() {
                render::success(out, placed, Utc::now())?;
            }
            Ok(())
        }
        Err(error) => {
            info!(transaction_type = %form.transaction_type(), %error, "Order not placed");
            render::field_errors(out, form.errors())?;
            workflow.cancel_transaction()?;
            Err(error.into())
        }
    }
}

async fn history(
    port: &dyn BrokeragePort,
    out: &mut dyn Write,
    client: String,
    kind: &str,
    status: &str,
    days: &str,
    search: String,
) -> Result<(), CliError> {
    let client_id = ClientId::new(client);
    let client = port.get_client(&client_id).await.into_result()?;

    let mut workflow = Workflow::new();
    workflow.select_client(client)?;
    let mut view = workflow.open_history()?;

    let filter = view.filter_mut();
    filter.kind = Choice::<TransactionType>::parse(kind, "transaction type")?;
    filter.status = Choice::<TransactionStatus>::parse(status, "status")?;
    filter.window = days.parse::<DateWindow>()?;
    filter.search = search;

    view.load(port).await;
    if let HistoryState::Failed(message) = view.state() {
        return Err(CliError::Remote(message.clone()));
    }
    render::history(out, &view.visible(Utc::now()), view.filter().has_active_filters())?;
    workflow.close_history()?;
    Ok(())
}
