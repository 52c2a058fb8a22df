use chrono::{Locale, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Escapes text so it can be inserted into HTML markup as literal content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl DisplayLocale {
    fn chrono_locale(self) -> Locale {
        match self {
            DisplayLocale::EnUs => Locale::en_US,
            DisplayLocale::EnGb => Locale::en_GB,
            DisplayLocale::FrFr => Locale::fr_FR,
            DisplayLocale::DeDe => Locale::de_DE,
            DisplayLocale::EsEs => Locale::es_ES,
            DisplayLocale::JaJp => Locale::ja_JP,
        }
    }

    // Long date style per locale ("January 7, 2024", "7 janvier 2024", ...)
    fn long_pattern(self) -> &'static str {
        match self {
            DisplayLocale::EnUs => "%B %-d, %Y",
            DisplayLocale::EnGb | DisplayLocale::FrFr => "%-d %B %Y",
            DisplayLocale::DeDe => "%-d. %B %Y",
            DisplayLocale::EsEs => "%-d de %B de %Y",
            DisplayLocale::JaJp => "%Y年%-m月%-d日",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormatter {
    locale: DisplayLocale,
}

impl DateFormatter {
    pub fn new(locale: DisplayLocale) -> Self {
        Self { locale }
    }

    pub fn long(&self, day: NaiveDate) -> String {
        day.and_time(NaiveTime::MIN)
            .and_utc()
            .format_localized(self.locale.long_pattern(), self.locale.chrono_locale())
            .to_string()
    }
}
