// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use crate::error::{Error, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(locale_str) = filename.strip_suffix(".ftl") {
                if let Ok(locale) = locale_str.parse::<LanguageIdentifier>() {
                    if let Some(content) = Asset::get(filename) {
                        let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
                        let res =
                            FluentResource::try_new(source).expect("Failed to parse FTL file.");
                        let mut bundle = FluentBundle::new(vec![locale.clone()]);
                        bundle.add_resource(res).expect("Failed to add resource.");
                        bundles.insert(locale.clone(), bundle);
                        available_locales.push(locale);
                    }
                }
            }
        }

        let default_locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap();
        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Switches to `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Locale`] when the string does not parse as a language
    /// identifier or no translation file covers it.
    pub fn set_locale(&mut self, locale: &str) -> Result<()> {
        let parsed = locale
            .parse::<LanguageIdentifier>()
            .map_err(|_| Error::Locale(locale.to_string()))?;
        if !self.bundles.contains_key(&parsed) {
            return Err(Error::Locale(locale.to_string()));
        }
        self.current_locale = parsed;
        Ok(())
    }

    /// Looks up a translation for the current locale, falling back to the
    /// default locale before giving up.
    pub fn tr(&self, key: &str) -> String {
        if let Some(value) = self.lookup(&self.current_locale, key) {
            return value;
        }
        let default_locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap();
        if let Some(value) = self.lookup(&default_locale, key) {
            return value;
        }
        format!("MISSING: {}", key)
    }

    fn lookup(&self, locale: &LanguageIdentifier, key: &str) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let msg = bundle.get_message(key)?;
        let pattern = msg.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Check CLI args
    if let Some(lang_str) = cli_lang {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 2. Check config file
    if let Some(lang_str) = &config.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 3. Check OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}
