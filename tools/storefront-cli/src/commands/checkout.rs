//! Interactive checkout.
//!
//! Billing, then payment, then review and submit. A failed submission keeps
//! the form and the cart, and the shopper may retry with new payment details.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Password, Select};
use storefront_core::checkout::{
    Address, AddressField, CardDetails, CheckoutFlow, DemoCollector, OrderSubmitter,
    PaymentCollector, PaymentMethod, SubmitError,
};

use super::cart::{print_lines, print_summary};
use super::CheckoutArgs;
use crate::context::Context;

const TOTAL_STEPS: usize = 3;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &mut Context) -> Result<()> {
    let user = ctx.require_user().await?;

    if ctx.cart.is_empty() {
        bail!("Your cart is empty");
    }

    ctx.output.header("Checkout");
    print_lines(&ctx.cart, ctx);
    print_summary(&ctx.cart.summary(&ctx.config.pricing), ctx);

    let mut flow = CheckoutFlow::new();

    // Step 1: Billing and shipping
    ctx.output.info("");
    ctx.output.step(1, TOTAL_STEPS, "Billing address");
    let mut billing = Address {
        first_name: user.first_name.clone().unwrap_or_default(),
        last_name: user.last_name.clone().unwrap_or_default(),
        ..Address::default()
    };
    loop {
        billing = prompt_address(&billing)?;
        flow.set_billing_address(billing.clone());
        match flow.advance() {
            Ok(_) => break,
            Err(e) => report_missing(&e.to_string(), &billing, ctx),
        }
    }

    let same = Confirm::new()
        .with_prompt("Ship to the billing address?")
        .default(true)
        .interact()?;
    if !same {
        flow.set_shipping_same_as_billing(false);
        loop {
            let shipping = prompt_address(&flow.effective_shipping_address())?;
            for field in AddressField::ALL {
                flow.update_shipping(field, shipping.field(field));
            }
            if shipping.is_complete() {
                break;
            }
            report_missing("Please complete the shipping address", &shipping, ctx);
        }
    }

    // Step 2: Payment
    ctx.output.info("");
    ctx.output.step(2, TOTAL_STEPS, "Payment");
    let method = if args.paypal {
        PaymentMethod::Paypal
    } else {
        select_payment_method()?
    };
    flow.set_payment_method(method);
    collect_payment(&mut flow, ctx)?;

    // Step 3: Review and submit
    ctx.output.info("");
    ctx.output.step(3, TOTAL_STEPS, "Review");
    ctx.output
        .kv("Ship to", &flow.effective_shipping_address().one_line());
    ctx.output.kv("Payment", flow.payment_method().display_name());
    let total = ctx.cart.summary(&ctx.config.pricing).total;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled; your cart was kept");
            return Ok(());
        }
    }

    loop {
        let spinner = ctx.output.spinner("Placing order...");
        let result = OrderSubmitter::new(&ctx.api)
            .submit(&mut flow, &mut ctx.cart)
            .await;
        spinner.finish_and_clear();

        let err = match result {
            Ok(confirmation) => {
                let order = &confirmation.order;
                if ctx.output.is_json() {
                    ctx.output.json(&serde_json::json!({
                        "order": order,
                        "redirectPath": confirmation.redirect_path,
                    }));
                    return Ok(());
                }
                ctx.output
                    .success(&format!("Order #{} placed", order.id));
                ctx.output.kv("Status", order.status.display_name());
                ctx.output.kv("Total", &order.total_amount.display());
                ctx.output.info(&format!(
                    "Run `storefront orders show {}` to track it.",
                    order.id
                ));
                return Ok(());
            }
            Err(err) => err,
        };

        if let SubmitError::Invalid(e) = &err {
            bail!("{}", e);
        }
        ctx.output.error(&err.to_string());
        if let Some(order_id) = err.orphaned_order() {
            ctx.output.warn(&format!(
                "Order #{} was created but not paid. Retrying places a new order.",
                order_id
            ));
        }

        let retry = !args.yes
            && Confirm::new()
                .with_prompt("Try again with different payment details?")
                .default(false)
                .interact()?;
        if !retry {
            bail!("Checkout failed; your cart was kept");
        }
        collect_payment(&mut flow, ctx)?;
    }
}

/// Prompt for every address field, starting from `initial`.
fn prompt_address(initial: &Address) -> Result<Address> {
    let mut address = initial.clone();
    for field in AddressField::ALL {
        let value: String = Input::new()
            .with_prompt(field.label())
            .with_initial_text(initial.field(field))
            .allow_empty(true)
            .interact_text()?;
        address.set_field(field, value.trim());
    }
    Ok(address)
}

fn report_missing(message: &str, address: &Address, ctx: &Context) {
    ctx.output.warn(message);
    for field in address.missing_fields() {
        ctx.output.list_item(field.label());
    }
}

fn select_payment_method() -> Result<PaymentMethod> {
    let methods = [PaymentMethod::CreditCard, PaymentMethod::Paypal];
    let labels: Vec<&str> = methods.iter().map(|m| m.display_name()).collect();
    let selected = Select::new()
        .with_prompt("Payment method")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(methods[selected])
}

/// Tokenize payment details until the collector accepts them.
fn collect_payment(flow: &mut CheckoutFlow, ctx: &Context) -> Result<()> {
    let collector = DemoCollector;

    if flow.payment_method() == PaymentMethod::Paypal {
        flow.capture_instrument(collector.collect_paypal()?);
        ctx.output.info("You will be redirected to PayPal to approve the payment.");
        return Ok(());
    }

    loop {
        let number: String = Input::new().with_prompt("Card number").interact_text()?;
        let expiry: String = Input::new()
            .with_prompt("Expiry (MM/YY)")
            .interact_text()?;
        let cvc = Password::new().with_prompt("CVC").interact()?;

        match collector.collect_card(&CardDetails::new(number, expiry, cvc)) {
            Ok(token) => {
                flow.capture_instrument(token);
                return Ok(());
            }
            Err(e) => ctx.output.warn(&e.to_string()),
        }
    }
}
