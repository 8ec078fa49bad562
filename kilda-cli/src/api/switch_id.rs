//! Switch identifier display formats
//!
//! OpenKilda shows datapath IDs either in its native colon-separated form
//! (`00:00:00:00:00:00:00:01`) or in the legacy inventory form
//! (`SW0000000000000001`). Conversion is lossless in both directions.

const LEGACY_PREFIX: &str = "SW";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskMode {
    Legacy,
    Kilda,
}

/// Convert a switch identifier into the requested display format
pub fn transform(switch_id: &str, mode: MaskMode) -> String {
    let hex = bare_hex(switch_id);
    if hex.is_empty() {
        return String::new();
    }

    match mode {
        MaskMode::Legacy => format!("{}{}", LEGACY_PREFIX, hex.to_uppercase()),
        MaskMode::Kilda => {
            let lower = hex.to_lowercase();
            let chars: Vec<char> = lower.chars().collect();
            chars
                .chunks(2)
                .map(|pair| pair.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join(":")
        }
    }
}

fn bare_hex(switch_id: &str) -> String {
    let trimmed = switch_id.trim();
    let unprefixed = match trimmed.get(..LEGACY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(LEGACY_PREFIX) => &trimmed[LEGACY_PREFIX.len()..],
        _ => trimmed,
    };
    unprefixed.chars().filter(|c| *c != ':').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilda_to_legacy() {
        assert_eq!(
            transform("00:00:00:00:00:00:00:0a", MaskMode::Legacy),
            "SW000000000000000A"
        );
    }

    #[test]
    fn test_legacy_to_kilda() {
        assert_eq!(
            transform("SW000000000000000A", MaskMode::Kilda),
            "00:00:00:00:00:00:00:0a"
        );
    }

    #[test]
    fn test_transform_is_idempotent_per_mode() {
        let legacy = transform("00:00:b0:d2:f5:00:5a:b8", MaskMode::Legacy);
        assert_eq!(transform(&legacy, MaskMode::Legacy), legacy);

        let kilda = transform(&legacy, MaskMode::Kilda);
        assert_eq!(kilda, "00:00:b0:d2:f5:00:5a:b8");
        assert_eq!(transform(&kilda, MaskMode::Kilda), kilda);
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(transform("", MaskMode::Legacy), "");
        assert_eq!(transform("SW", MaskMode::Kilda), "");
    }
}
