//! Utils

use clap::Parser;

/// Arguments for the allocation demo
#[derive(Debug, Parser)]
pub struct DemoAllocationArgs {
    /// Percentage rate to allocate, in percent points (e.g. 15 for 15% off)
    #[clap(short, long)]
    pub rate: Option<f64>,

    /// Fixed amount to allocate, in major units (e.g. 5.00)
    #[clap(short, long)]
    pub amount: Option<f64>,

    /// Currency code for the cart
    #[clap(short, long, default_value = "EUR")]
    pub currency: String,
}
