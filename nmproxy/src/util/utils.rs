//! Utility functions for property value conversion and display.

use log::warn;
use std::borrow::Cow;
use std::str;

/// Decode SSID bytes, defaulting to `<Hidden Network>` if empty or invalid UTF-8.
pub fn decode_ssid_or_hidden(bytes: &[u8]) -> Cow<'static, str> {
    if bytes.is_empty() {
        return Cow::Borrowed("<Hidden Network>");
    }

    match str::from_utf8(bytes) {
        Ok(s) => Cow::Owned(s.to_owned()),
        Err(e) => {
            warn!("Invalid UTF-8 in SSID: {e}");
            Cow::Borrowed("<Hidden Network>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ssid_or_hidden() {
        assert_eq!(decode_ssid_or_hidden(b"MyNetwork"), "MyNetwork");
        assert_eq!(decode_ssid_or_hidden(b""), "<Hidden Network>");
        assert_eq!(decode_ssid_or_hidden(&[0xff, 0xfe]), "<Hidden Network>");
    }
}
