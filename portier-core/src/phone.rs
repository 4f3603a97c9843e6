//! Phone number normalization
//!
//! Numbers are normalized to E.164 (`+33612345678`) against a fixed region. Only mobile
//! numbers are considered valid, since the number is meant to reach the account holder
//! directly.

/// Dialing rules for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRegion {
    pub iso_code: &'static str,
    pub country_code: &'static str,
    pub national_length: usize,
    pub mobile_prefixes: &'static [&'static str],
}

impl PhoneRegion {
    pub const FRANCE: PhoneRegion = PhoneRegion {
        iso_code: "FR",
        country_code: "33",
        national_length: 9,
        mobile_prefixes: &["6", "7"],
    };

    pub const BELGIUM: PhoneRegion = PhoneRegion {
        iso_code: "BE",
        country_code: "32",
        national_length: 9,
        mobile_prefixes: &["4"],
    };

    pub const SWITZERLAND: PhoneRegion = PhoneRegion {
        iso_code: "CH",
        country_code: "41",
        national_length: 9,
        mobile_prefixes: &["7"],
    };

    const ALL: [PhoneRegion; 3] = [Self::FRANCE, Self::BELGIUM, Self::SWITZERLAND];

    /// Look a region up by its ISO 3166-1 alpha-2 code.
    pub fn from_iso(code: &str) -> Option<PhoneRegion> {
        Self::ALL
            .into_iter()
            .find(|region| region.iso_code.eq_ignore_ascii_case(code.trim()))
    }
}

impl Default for PhoneRegion {
    fn default() -> Self {
        Self::FRANCE
    }
}

/// Result of normalizing a raw phone number.
///
/// `number` is only present when the input was valid for the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhone {
    pub number: Option<String>,
    pub is_valid: bool,
}

impl NormalizedPhone {
    fn invalid() -> Self {
        Self {
            number: None,
            is_valid: false,
        }
    }
}

/// Locale-aware canonicalization of phone numbers.
pub trait PhoneNormalizer: Send + Sync + 'static {
    fn normalize(&self, raw: &str) -> NormalizedPhone;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegionPhoneNormalizer {
    region: PhoneRegion,
}

impl RegionPhoneNormalizer {
    pub fn new(region: PhoneRegion) -> Self {
        Self { region }
    }

    pub fn region(&self) -> PhoneRegion {
        self.region
    }

    /// Strip the international or trunk prefix, leaving the national significant number.
    fn national_number<'a>(&self, compact: &'a str) -> Option<&'a str> {
        let international = compact
            .strip_prefix('+')
            .or_else(|| compact.strip_prefix("00"));

        match international {
            Some(rest) => rest.strip_prefix(self.region.country_code),
            None => Some(compact.strip_prefix('0').unwrap_or(compact)),
        }
    }
}

impl PhoneNormalizer for RegionPhoneNormalizer {
    fn normalize(&self, raw: &str) -> NormalizedPhone {
        let compact: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '.' | '-' | '(' | ')' | '\t'))
            .collect();

        let Some(national) = self.national_number(&compact) else {
            return NormalizedPhone::invalid();
        };

        let well_formed = national.len() == self.region.national_length
            && national.chars().all(|c| c.is_ascii_digit())
            && self
                .region
                .mobile_prefixes
                .iter()
                .any(|prefix| national.starts_with(prefix));

        if !well_formed {
            return NormalizedPhone::invalid();
        }

        NormalizedPhone {
            number: Some(format!("+{}{}", self.region.country_code, national)),
            is_valid: true,
        }
    }
}
