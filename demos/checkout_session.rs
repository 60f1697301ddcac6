//! Checkout Session Example
//!
//! Walks one visitor through a full session: shopping anonymously,
//! leaving an unsized item pending, signing in, and landing on the
//! merged, persisted cart.
//!
//! Use `-f` to load a cart fixture set by name
//! Use `-p` to load a pending-item fixture by name

use anyhow::Result;
use clap::Parser;

use panier::fixtures::load_pending;
use panier::prelude::*;

/// Arguments for the checkout session example
#[derive(Debug, Parser)]
struct CheckoutSessionArgs {
    /// Cart fixture set to seed the device and persisted carts with
    #[clap(short, long, default_value = "returning_overlap")]
    fixture: String,

    /// Pending-item fixture to carry across the sign-in
    #[clap(short, long)]
    pending: Option<String>,

    /// Size chosen for the pending item after sign-in
    #[clap(short, long, default_value = "M")]
    size: String,
}

#[expect(clippy::print_stdout, reason = "Example code")]
fn print_cart(label: &str, lines: &[LineItem]) {
    println!("{label}");
    for line in lines {
        println!(
            "  {:>2}× {:<24} {:>6} € (size {})",
            line.quantity, line.name, line.price, line.size
        );
    }
    if lines.is_empty() {
        println!("  (empty)");
    }
}

/// Checkout session example
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CheckoutSessionArgs::parse();
    let fixture = CartFixture::from_set(&args.fixture)?;
    let customer = UserId::from("demo-customer");

    let remote = MemoryRemoteStore::new();
    let device = MemoryDeviceStore::new();
    let pending = MemoryPendingStore::new();
    remote.seed(customer.clone(), fixture.persisted().to_vec());
    device.seed(fixture.device().to_vec());

    // Anonymous session: the device store is authoritative.
    let mut engine = CartEngine::open(&remote, &device, &pending, None).await;
    print_cart("Browsing anonymously, device cart:", engine.lines());

    if let Some(name) = args.pending.as_deref() {
        let item = load_pending(name)?;
        println!("\nStarting an add for \"{}\" without a size…", item.name);
        engine.set_pending_item(item).await;
    }

    // The identity provider reports a sign-in: the one-time merge runs.
    engine.sign_in(customer.clone()).await;
    print_cart("\nSigned in, merged cart:", engine.lines());

    if engine.pending_item().is_some() {
        println!("\nCompleting the pending item with size {}…", args.size);
        engine.complete_pending_item(args.size).await;
        print_cart("\nCart after completing the pending item:", engine.lines());
    }

    println!(
        "\n{} article(s), {} € total",
        engine.total_items(),
        engine.total_price()
    );

    print_cart("\nPersisted account cart:", &remote.fetch(&customer).await?);
    println!("Device cart cleared: {}", device.read().await?.is_empty());

    Ok(())
}
