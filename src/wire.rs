// src/wire.rs
use bytes::Bytes;
use itoa::Buffer;
use rust_decimal::Decimal;

use crate::store::CustomerId;
use crate::view::RankedCustomer;

#[inline(always)]
fn push_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
}

#[inline(always)]
fn push_i64(out: &mut Vec<u8>, buf: &mut Buffer, v: i64) {
    push_str(out, buf.format(v));
}

#[inline(always)]
fn push_u32(out: &mut Vec<u8>, buf: &mut Buffer, v: u32) {
    push_str(out, buf.format(v));
}

// Scores travel as JSON strings; the decimal display form keeps the input
// precision where a float round-trip would not.
#[inline(always)]
fn push_score(out: &mut Vec<u8>, v: &Decimal) {
    out.push(b'"');
    push_str(out, &v.to_string());
    out.push(b'"');
}

#[inline(always)]
fn push_entry(out: &mut Vec<u8>, buf: &mut Buffer, e: &RankedCustomer) {
    push_str(out, "{\"customer_id\":");
    push_i64(out, buf, e.customer_id);
    push_str(out, ",\"score\":");
    push_score(out, &e.score);
    push_str(out, ",\"rank\":");
    push_u32(out, buf, e.rank);
    out.push(b'}');
}

/// Ranked entries as a JSON array, ascending rank order.
pub fn encode_entries(entries: &[RankedCustomer]) -> Bytes {
    let mut out = Vec::with_capacity(2 + entries.len() * 48);
    let mut b = Buffer::new();

    out.push(b'[');
    for (i, e) in entries.iter().enumerate() {
        if i != 0 {
            out.push(b',');
        }
        push_entry(&mut out, &mut b, e);
    }
    out.push(b']');
    Bytes::from(out)
}

/// Update reply: the customer's resulting score.
pub fn encode_score(customer_id: CustomerId, score: Decimal) -> Bytes {
    let mut out = Vec::with_capacity(64);
    let mut b = Buffer::new();

    push_str(&mut out, "{\"customer_id\":");
    push_i64(&mut out, &mut b, customer_id);
    push_str(&mut out, ",\"score\":");
    push_score(&mut out, &score);
    out.push(b'}');
    Bytes::from(out)
}

/// Final snapshot frame written by the offline load path.
pub fn encode_final(entries: &[RankedCustomer]) -> Bytes {
    let mut out = Vec::with_capacity(32 + entries.len() * 48);
    let mut b = Buffer::new();

    push_str(&mut out, "{\"type\":\"final\",\"leaderboard\":[");
    for (i, e) in entries.iter().enumerate() {
        if i != 0 {
            out.push(b',');
        }
        push_entry(&mut out, &mut b, e);
    }
    push_str(&mut out, "]}");
    Bytes::from(out)
}
