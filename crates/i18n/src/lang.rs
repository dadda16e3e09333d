//! Locale identification and negotiation

use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Locales the console ships translations for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Simplified Chinese
    ZhCn,
}

impl Locale {
    /// Every shipped locale, in fallback order
    pub const ALL: [Locale; 2] = [Locale::En, Locale::ZhCn];

    /// BCP 47 tag for this locale
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// The language identifier fluent negotiates against
    pub fn lang_id(&self) -> LanguageIdentifier {
        self.tag().parse().expect("shipped locale tags are valid")
    }

    /// Pick the best shipped locale for a list of requested tags
    ///
    /// Unknown tags fall through to English.
    pub fn negotiate(requested: &[&str]) -> Locale {
        let requested: Vec<LanguageIdentifier> = requested
            .iter()
            .filter_map(|tag| tag.parse().ok())
            .collect();
        let available: Vec<LanguageIdentifier> =
            Self::ALL.iter().map(|locale| locale.lang_id()).collect();
        let default = Locale::En.lang_id();

        let negotiated = negotiate_languages(
            &requested,
            &available,
            Some(&default),
            NegotiationStrategy::Filtering,
        );

        negotiated
            .first()
            .and_then(|id| Self::ALL.iter().find(|l| l.lang_id() == **id))
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept underscore variants some backends emit.
        match s.replace('_', "-").as_str() {
            "en" | "en-US" | "en-GB" => Ok(Locale::En),
            "zh" | "zh-CN" | "zh-Hans" => Ok(Locale::ZhCn),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// A locale tag the console has no translations for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown locale: {}", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_tags() {
        assert_eq!(Locale::En.tag(), "en");
        assert_eq!(Locale::ZhCn.tag(), "zh-CN");
    }

    #[test]
    fn test_parse_accepts_common_variants() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("zh-CN".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert_eq!("zh_CN".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_negotiate_prefers_requested() {
        assert_eq!(Locale::negotiate(&["zh-CN", "en"]), Locale::ZhCn);
        assert_eq!(Locale::negotiate(&["en-US"]), Locale::En);
    }

    #[test]
    fn test_negotiate_falls_back_to_english() {
        assert_eq!(Locale::negotiate(&["fr", "de"]), Locale::En);
        assert_eq!(Locale::negotiate(&[]), Locale::En);
    }

    #[test]
    fn test_locale_serde_round_trip() {
        let json = serde_json::to_string(&Locale::ZhCn).unwrap();
        assert_eq!(json, "\"zh-cn\"");
        assert_eq!(serde_json::from_str::<Locale>(&json).unwrap(), Locale::ZhCn);
    }
}
