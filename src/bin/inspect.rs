use std::{collections::HashSet, fs::File};

use anyhow::Result;
use rankboard::parser::Feed;
use rust_decimal::Decimal;

fn main() -> Result<()> {
    let f = File::open("data/updates.ndjson")?;

    let mut customers = HashSet::<i64>::new();
    let mut updates = 0u64;
    let mut out_of_range = 0u64;

    Feed::ndjson_decode_reader(f, |rec| {
        customers.insert(rec.customer);
        updates += 1;
        if rec.delta.abs() > Decimal::ONE_THOUSAND {
            out_of_range += 1;
        }
    })?;

    println!("unique_customers={}", customers.len());
    println!("updates={}", updates);
    println!("out_of_range={}", out_of_range);
    Ok(())
}
