//! Providers command - print the defaults table

use console::style;
use kapok_core::Provider;

use crate::error::Result;

pub fn run() -> Result<()> {
    println!(
        "{:<10} {:<18} {}",
        style("PROVIDER").bold(),
        style("STORAGE CLASS").bold(),
        style("INGRESS CLASS").bold()
    );

    for provider in Provider::ALL {
        let defaults = provider.defaults();
        println!(
            "{:<10} {:<18} {}",
            provider.as_str(),
            defaults.storage_class,
            defaults.ingress_class
        );
    }

    Ok(())
}
