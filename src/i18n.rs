use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Interface language. Persisted in local storage under the `lang` key; the
/// first visit falls back to the browser language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    pub fn toggled(self) -> Lang {
        match self {
            Lang::En => Lang::Ru,
            Lang::Ru => Lang::En,
        }
    }

    /// Maps a BCP 47 tag from `navigator.language` to a supported language.
    pub fn from_browser(tag: &str) -> Lang {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ru") {
            Lang::Ru
        } else {
            Lang::En
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru" => Ok(Lang::Ru),
            "en" => Ok(Lang::En),
            _ => Err(()),
        }
    }
}

/// A static bilingual string pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tr {
    pub en: &'static str,
    pub ru: &'static str,
}

impl Tr {
    pub const fn new(en: &'static str, ru: &'static str) -> Tr {
        Tr { en, ru }
    }

    pub fn get(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.en,
            Lang::Ru => self.ru,
        }
    }
}

/// Picks one of two static strings by language. Mirrors how every label in
/// the UI is written: the English and Russian variants side by side at the
/// call site.
pub fn t(lang: Lang, en: &'static str, ru: &'static str) -> &'static str {
    match lang {
        Lang::En => en,
        Lang::Ru => ru,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_tag_resolution() {
        assert_eq!(Lang::from_browser("ru"), Lang::Ru);
        assert_eq!(Lang::from_browser("ru-RU"), Lang::Ru);
        assert_eq!(Lang::from_browser("RU_ru"), Lang::Ru);
        assert_eq!(Lang::from_browser("en-US"), Lang::En);
        assert_eq!(Lang::from_browser("de"), Lang::En);
        assert_eq!(Lang::from_browser(""), Lang::En);
    }

    #[test]
    fn storage_round_trip() {
        for lang in [Lang::En, Lang::Ru] {
            assert_eq!(lang.to_string().parse::<Lang>(), Ok(lang));
        }
        assert!("fr".parse::<Lang>().is_err());
    }

    #[test]
    fn pair_lookup() {
        let pair = Tr::new("Author", "Автор");
        assert_eq!(pair.get(Lang::En), "Author");
        assert_eq!(pair.get(Lang::Ru), "Автор");
        assert_eq!(t(Lang::Ru, "Projects", "Проекты"), "Проекты");
    }
}
