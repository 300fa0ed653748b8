// src/parser.rs
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};

use crate::store::CustomerId;

/// One line of the NDJSON update feed.
///
/// Deltas are decimal; feeds should carry them as JSON strings so precision
/// survives the trip (`{"customer":1,"delta":"0.1"}`).
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct UpdateRecord {
    pub customer: CustomerId,
    pub delta: Decimal,
}

pub struct Feed;

impl Feed {
    pub fn ndjson_decode_reader<R: Read>(
        r: R,
        mut on_update: impl FnMut(UpdateRecord),
    ) -> Result<()> {
        let mut br = BufReader::new(r);
        let mut line = String::new();

        loop {
            line.clear();
            if br.read_line(&mut line)? == 0 {
                break;
            }

            let s = line.trim();
            if s.is_empty() {
                continue;
            }

            let rec: UpdateRecord = serde_json::from_str(s)?;
            on_update(rec);
        }

        Ok(())
    }
}
