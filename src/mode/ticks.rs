//! Tick engine inspection mode

use tickplot::ticks::compute_auto;

use crate::output::{print_error, print_labels, print_scale, print_tick_table};

/// Compute and print ticks for the given values
pub fn run_ticks(values: &[f64], tight: bool, log: bool, quiet: bool) {
    let ticks = compute_auto(values, tight, log).unwrap_or_else(|e| {
        print_error(&e.to_string());
        std::process::exit(1);
    });

    if quiet {
        print_labels(&ticks);
        return;
    }

    let placement = if tight { "tight" } else { "loose" };
    let axis = if log { ", log" } else { "" };
    println!("[Ticks] {} values, {}{}", values.len(), placement, axis);
    print_scale(&ticks);
    print_tick_table(&ticks);
}
