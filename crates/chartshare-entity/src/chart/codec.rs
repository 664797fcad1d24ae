//! Canonical text encoding of charts.
//!
//! A token is the version marker `'0'` followed by the unpadded URL-safe
//! base64 of the raw layout with trailing zero bitmap bytes removed. Every
//! chart has exactly one token and every other string is rejected, so tokens
//! can be compared and cached without normalization.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::{ChartDocument, ChartError, DAYS_LEN, RAW_LEN, YEAR_LEN, days_in_year};

/// Leading character of every token produced by this version of the codec.
pub const VERSION_MARKER: char = '0';

/// Decodes a token into a chart, accepting only the canonical form.
pub fn decode(token: &str) -> Result<ChartDocument, ChartError> {
    let payload = token
        .strip_prefix(VERSION_MARKER)
        .ok_or(ChartError::InvalidEncoding)?;

    if payload.len() * 6 / 8 > RAW_LEN {
        return Err(ChartError::InvalidEncoding);
    }

    // Line breaks are rejected explicitly so that acceptance never depends
    // on how lenient the base64 decoder is about whitespace.
    if payload.contains(['\r', '\n']) {
        return Err(ChartError::InvalidEncoding);
    }

    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ChartError::InvalidEncoding)?;
    if raw.len() < YEAR_LEN + 1 || raw.len() > RAW_LEN {
        return Err(ChartError::InvalidEncoding);
    }

    let year = u16::from_be_bytes([raw[0], raw[1]]);
    let bitmap = &raw[YEAR_LEN..];
    let last = bitmap[bitmap.len() - 1];

    // A trailing zero byte is never canonical: the encoder would have trimmed it.
    if last == 0 {
        return Err(ChartError::InvalidEncoding);
    }
    if raw.len() == RAW_LEN && last.trailing_zeros() < padding_bits(year) {
        return Err(ChartError::InvalidEncoding);
    }
    if bitmap.iter().all(|&b| b == 0) {
        return Err(ChartError::InvalidEncoding);
    }

    let mut days = [0u8; DAYS_LEN];
    days[..bitmap.len()].copy_from_slice(bitmap);
    Ok(ChartDocument::new(year, days))
}

/// Encodes a chart into its canonical token.
///
/// A blank chart still produces a token (year plus one zero byte), which
/// [`decode`] rejects.
pub fn encode(chart: &ChartDocument) -> String {
    encode_raw(&chart.to_bytes())
}

/// Encodes a chart given in its 48-byte raw layout, as stored in the database.
pub fn encode_bytes(raw: &[u8]) -> Result<String, ChartError> {
    let raw: &[u8; RAW_LEN] = raw.try_into().map_err(|_| ChartError::InvalidDocument)?;
    Ok(encode_raw(raw))
}

fn encode_raw(raw: &[u8; RAW_LEN]) -> String {
    let end = raw[YEAR_LEN..]
        .iter()
        .rposition(|&b| b != 0)
        .map_or(YEAR_LEN + 1, |i| YEAR_LEN + i + 1);

    let mut token = String::with_capacity(1 + (end * 4).div_ceil(3));
    token.push(VERSION_MARKER);
    URL_SAFE_NO_PAD.encode_string(&raw[..end], &mut token);
    token
}

/// Number of low bits of the last bitmap byte that lie past the end of `year`.
fn padding_bits(year: u16) -> u32 {
    match days_in_year(year) % 8 {
        0 => 0,
        used => u32::from(8 - used),
    }
}
