//! Cart Session Example
//!
//! Walks a cart through a full session: adds, a quantity update, a catalog
//! sync with a price change and an availability drop, the pre-checkout gate,
//! and a reload from the persisted record.
//!
//! Use `-n` to choose how many lamps land in the cart.

use anyhow::Result;
use clap::Parser;

use trolley::{
    cart::Cart,
    fixtures::{product, unavailable_product},
    notify::{NotificationSink, Severity},
    storage::MemoryStorage,
    store::CartStore,
};

/// Cart Session Example
#[derive(Debug, Parser)]
struct Args {
    /// How many lamps to add to the cart
    #[arg(short, default_value_t = 2)]
    n: u32,
}

/// Sink that prints notifications the way a toast layer would show them.
#[derive(Debug, Default)]
struct PrintSink;

#[expect(clippy::print_stdout, reason = "Example program output to user")]
impl NotificationSink for PrintSink {
    fn notify(&mut self, severity: Severity, title: &str, message: Option<&str>) {
        match message {
            Some(message) => println!("  [{severity:?}] {title}: {message}"),
            None => println!("  [{severity:?}] {title}"),
        }
    }
}

#[expect(clippy::print_stdout, reason = "Example program output to user")]
fn print_cart(cart: &Cart) {
    for item in cart.items() {
        println!(
            "  {} x{} = {}",
            item.product().name,
            item.quantity(),
            item.subtotal()
        );
    }
    println!(
        "  total: {} items, {}",
        cart.total_items(),
        cart.total_price()
    );
}

/// Cart Session Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let args = Args::parse();

    let mut store = CartStore::load(MemoryStorage::new(), PrintSink);
    store.subscribe(|cart: &Cart| print_cart(cart));

    println!("adding items:");
    store.add_item(product(1, 1000, 5), args.n)?;
    store.add_item(product(2, 2550, 10), 1)?;

    println!("\nbumping the lamp quantity:");
    store.update_quantity(1, args.n.saturating_add(1))?;

    println!("\nsyncing with the catalog (lamp repriced, rug delisted):");
    store.sync_with_catalog(&[product(1, 1200, 5), unavailable_product(2, 2550, 10)]);

    let report = store.validate();
    println!("\ncheckout gate: valid = {}", report.valid);
    for error in &report.errors {
        println!("  - {error}");
    }

    println!("\nreloading the persisted cart in a fresh session:");
    let next_session = CartStore::load(store.storage().clone(), PrintSink);
    print_cart(next_session.cart());

    Ok(())
}
