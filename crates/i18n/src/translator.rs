//! Message formatting over fluent bundles

use crate::lang::Locale;
use api_client::MessageLookup;
use fluent::concurrent::FluentBundle;
use fluent::{FluentArgs, FluentResource};
use std::collections::HashMap;
use std::sync::RwLock;

// Translations ship compiled in; the console has no runtime resource loading.
const EN_FTL: &str = r#"
needLogin = Please log in first
sessionInvalid = Session expired, please log in again
requestFailed = Request failed, please try again later
networkOffline = Network connection lost
networkError = Network request failed
"#;

const ZH_CN_FTL: &str = r#"
needLogin = 请先登录
sessionInvalid = 登录失效，请重新登录
requestFailed = 数据请求失败
networkOffline = 网络连接失败
networkError = 网络请求出错
"#;

/// Locale-aware message formatter
///
/// Lookups fall back from the active locale to English, and finally to the
/// key itself so a missing translation never blanks a notification.
pub struct Translator {
    bundles: HashMap<Locale, FluentBundle<FluentResource>>,
    active: RwLock<Locale>,
}

impl Translator {
    /// Create a translator with English active
    pub fn new() -> Self {
        let mut bundles = HashMap::new();
        bundles.insert(Locale::En, Self::build_bundle(Locale::En, EN_FTL));
        bundles.insert(Locale::ZhCn, Self::build_bundle(Locale::ZhCn, ZH_CN_FTL));
        Self {
            bundles,
            active: RwLock::new(Locale::default()),
        }
    }

    /// Create a translator with a specific locale active
    pub fn with_locale(locale: Locale) -> Self {
        let translator = Self::new();
        translator.set_locale(locale);
        translator
    }

    fn build_bundle(locale: Locale, ftl: &str) -> FluentBundle<FluentResource> {
        // Shipped FTL is static; a parse error still yields a usable resource
        // with the offending entries dropped.
        let resource = FluentResource::try_new(ftl.to_string())
            .unwrap_or_else(|(resource, _errors)| resource);
        let mut bundle = FluentBundle::new_concurrent(vec![locale.lang_id()]);
        // Keep output free of bidi isolation marks; notices render in plain text.
        bundle.set_use_isolating(false);
        let _ = bundle.add_resource(resource);
        bundle
    }

    /// The currently active locale
    pub fn locale(&self) -> Locale {
        *self.active.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Switch the active locale
    pub fn set_locale(&self, locale: Locale) {
        let mut active = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *active = locale;
    }

    /// Resolve a key in the active locale
    pub fn translate(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Resolve a key with arguments in the active locale
    pub fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let active = self.locale();
        self.format_in(active, key, args)
            .or_else(|| self.format_in(Locale::En, key, args))
            .unwrap_or_else(|| key.to_string())
    }

    fn format_in(&self, locale: Locale, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&locale)?;
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;
        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);
        Some(formatted.into_owned())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLookup for Translator {
    fn message(&self, key: &str) -> String {
        self.translate(key)
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale())
            .field("bundles", &self.bundles.len())
            .finish()
    }
}
