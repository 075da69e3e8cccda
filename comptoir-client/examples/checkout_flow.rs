//! End-to-end terminal flow against a running backend
//!
//! Usage:
//!   COMPTOIR_API_URL=http://localhost:8080 cargo run --example checkout_flow
//!
//! Opens a caisse session, sells the first catalog product for cash, then
//! closes the session and prints the reconciliation.

use anyhow::{Context, bail};
use comptoir_client::{ComptoirClient, PosApi};
use comptoir_core::cart::{Cart, CheckoutRequest};
use shared::models::{PaymentMethod, SessionCloseRequest, SessionOpen, StockSnapshot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let base_url =
        std::env::var("COMPTOIR_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let client = ComptoirClient::network(&base_url);

    let session = client
        .open_session(&SessionOpen {
            name: "Demo session".to_string(),
            opening_amount: 100.0,
            description: Some("checkout_flow example".to_string()),
        })
        .await
        .context("opening caisse session")?;
    let session_id = session.id.context("backend returned a session without id")?;
    println!("Opened session {} with float {:.2}", session_id, session.opening_amount);

    let products = client.fetch_products().await.context("fetching catalog")?;
    let Some(product) = products.iter().find(|p| p.in_stock() && p.is_active) else {
        bail!("no sellable product in the catalog");
    };
    let rate = client.fetch_tax_rate().await.context("fetching tax rate")?;

    let mut cart = Cart::new(rate)?;
    cart.add_item(product, 1)?;
    let totals = cart.totals();
    println!("Cart: 1 x {} -> total {:.2}", product.name, totals.total);

    // Re-fetch right before checkout; stock may have moved
    let live = StockSnapshot::from_products(&client.fetch_products().await?);
    let draft = cart
        .checkout(
            CheckoutRequest {
                payment_method: PaymentMethod::Cash,
                amount_paid: Some(200.0),
                caisse_session_id: Some(session_id),
            },
            &live,
        )?;

    let sale = client.submit_sale(&draft).await.context("submitting sale")?;
    println!(
        "Sale {} recorded: paid {:.2}, change {:.2}",
        sale.id, sale.amount_paid, sale.change_given
    );

    let stats = client.session_statistics(session_id).await?;
    let closed = client
        .close_session(
            session_id,
            &SessionCloseRequest {
                closing_amount: 100.0 + stats.cash_revenue,
                notes: Some("demo close".to_string()),
            },
        )
        .await
        .context("closing session")?;

    println!(
        "Session closed: expected {:.2}, counted {:.2}, difference {:.2}",
        closed.expected_amount.unwrap_or_default(),
        closed.closing_amount.unwrap_or_default(),
        closed.difference.unwrap_or_default(),
    );

    Ok(())
}
