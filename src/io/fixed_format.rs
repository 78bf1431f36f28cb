//! Fixed-width format handling for accounts and transaction log lines
//!
//! This module centralizes all fixed-width format concerns, providing:
//! - Field-level encoders (name, account identifier, money, misc)
//! - Line-level encoders for account and transaction records
//! - Lenient line decoding for the accounts file
//!
//! All functions are pure (no I/O) for easy testing. Encoders are total:
//! arbitrary input is trimmed, truncated, clamped, or defaulted rather
//! than rejected, so positional decoding always sees exact widths.

use crate::types::{Account, AccountPlan, AccountStatus, TransactionRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Width of one encoded transaction log line
pub const TX_LINE_WIDTH: usize = 40;

/// Width of one encoded accounts file line
pub const ACCOUNT_LINE_WIDTH: usize = 37;

/// Name marking the accounts file sentinel line
pub const END_OF_FILE_MARKER: &str = "END_OF_FILE";

/// Pad with spaces on the right to exactly `width` characters
///
/// Input longer than `width` keeps its leading characters. Operates on
/// characters, not bytes, so multibyte input cannot split a code point.
pub fn pad_right(s: &str, width: usize) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars.truncate(width);
    while chars.len() < width {
        chars.push(' ');
    }
    chars.into_iter().collect()
}

/// Pad with zeros on the left to exactly `width` characters
///
/// Input longer than `width` keeps its trailing characters.
pub fn pad_left_zeros(s: &str, width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() >= width {
        chars[chars.len() - width..].iter().collect()
    } else {
        let mut out = "0".repeat(width - chars.len());
        out.push_str(s);
        out
    }
}

/// Encode a holder name to its 20-character field
///
/// Trims, truncates to 20 characters, pads right with spaces.
pub fn name_field(s: &str) -> String {
    pad_right(s.trim(), 20)
}

/// Encode an account identifier to its canonical 5-digit form
///
/// Parses the trimmed input as an integer, defaulting to 0 on any parse
/// failure, and zero-pads to 5 digits. Values wider than 5 digits keep
/// their full width. Idempotent on its own output.
pub fn account_field(s: &str) -> String {
    let n: i32 = s.trim().parse().unwrap_or(0);
    format!("{:05}", n)
}

/// Encode a monetary amount to its 8-character field
///
/// Negative amounts clamp to zero. The amount is rendered with exactly
/// two decimal digits and zero-padded on the left to 8 characters.
/// Renderings wider than 8 characters are clipped to their first 8,
/// dropping the most significant digits; the quirk is part of the file
/// format and is preserved for compatibility with existing data.
pub fn money_field(amount: Decimal) -> String {
    let amount = if amount < Decimal::ZERO {
        Decimal::ZERO
    } else {
        amount
    };
    let formatted = format!("{:.2}", amount);
    if formatted.chars().count() > 8 {
        formatted.chars().take(8).collect()
    } else {
        pad_left_zeros(&formatted, 8)
    }
}

/// Encode a miscellaneous value to its 2-character field
///
/// Trims, truncates to 2 characters, pads right with spaces.
pub fn misc_field(s: &str) -> String {
    pad_right(s.trim(), 2)
}

/// Encode one transaction record as a fixed 40-character log line
///
/// Layout: 2-char code, space, 20-char name, space, 5-char account,
/// space, 8-char money, 2-char misc. The assembled line is padded or
/// truncated to exactly 40 characters as a final guard.
pub fn encode_transaction_line(record: &TransactionRecord) -> String {
    let line = format!(
        "{} {} {} {}{}",
        record.code.as_str(),
        name_field(&record.holder),
        account_field(&record.account),
        money_field(record.amount),
        misc_field(&record.misc),
    );
    pad_right(&line, TX_LINE_WIDTH)
}

/// Encode one account as a fixed 37-character accounts file line
///
/// Layout: 5-char identifier, space, 20-char name, space, status
/// character, space, 8-char money.
pub fn encode_account_line(account: &Account) -> String {
    let line = format!(
        "{} {} {} {}",
        account_field(&account.id),
        name_field(&account.name),
        account.status.as_char(),
        money_field(account.balance),
    );
    pad_right(&line, ACCOUNT_LINE_WIDTH)
}

/// The sentinel line terminating the accounts file
pub fn accounts_sentinel_line() -> String {
    format!(
        "00000 {} A {}",
        name_field(END_OF_FILE_MARKER),
        money_field(Decimal::ZERO)
    )
}

/// Result of decoding one accounts file line
#[derive(Debug, Clone, PartialEq)]
pub enum AccountLine {
    /// A decoded account entry
    Entry(Account),
    /// The sentinel line; loading stops here
    EndOfFile,
    /// A line too short to decode; skipped silently
    Skipped,
}

/// Decode one accounts file line at fixed character offsets
///
/// Lines shorter than 37 characters are skipped. A line whose trimmed
/// name field equals the sentinel marker ends the file. Decoding is
/// lenient: an unparsable identifier reads as 00000, an unknown status
/// character reads as Active, an unparsable balance reads as 0.00. The
/// plan is not persisted in this format, so every entry loads on the
/// standard plan.
///
/// # Arguments
///
/// * `line` - One raw line, without its trailing newline
///
/// # Returns
///
/// An `AccountLine` telling the caller to add an entry, stop, or skip.
pub fn decode_account_line(line: &str) -> AccountLine {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() < ACCOUNT_LINE_WIDTH {
        return AccountLine::Skipped;
    }

    let name: String = chars[6..26].iter().collect::<String>().trim().to_string();
    if name == END_OF_FILE_MARKER {
        return AccountLine::EndOfFile;
    }

    let id = account_field(&chars[0..5].iter().collect::<String>());
    let status = AccountStatus::from_char(chars[27]);
    let raw_balance: String = chars[29..37].iter().collect();
    let balance = Decimal::from_str(raw_balance.trim()).unwrap_or(Decimal::ZERO);

    AccountLine::Entry(Account {
        id,
        name,
        status,
        plan: AccountPlan::Standard,
        balance,
    })
}
