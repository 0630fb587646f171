#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Intl, Object};
use railfolio_core::Language;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

const LOCALE_TABLE: &[(Language, &str)] = &[
    (Language::En, include_str!("../i18n/en.json")),
    (Language::De, include_str!("../i18n/de.json")),
];

pub struct I18nBundle {
    pub lang: Language,
    translations: Value,
    fallback: Value,
}

fn load_translations(lang: Language) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
        .unwrap_or(LOCALE_TABLE[0].1);

    serde_json::from_str(bundle).ok()
}

fn build_bundle(lang: Language) -> I18nBundle {
    let fallback = load_translations(Language::En).unwrap_or(Value::Null);
    let translations = load_translations(lang).unwrap_or_else(|| fallback.clone());
    I18nBundle {
        lang,
        translations,
        fallback,
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(build_bundle(Language::default()));
}

/// Switch the active UI language and mirror it onto `<html lang>`.
pub fn set_lang(lang: Language) {
    CURRENT.with(|cell| cell.replace(build_bundle(lang)));
    #[cfg(target_arch = "wasm32")]
    if let Some(el) = crate::dom::document().and_then(|doc| doc.document_element()) {
        let _ = el.set_attribute("lang", lang.tag());
    }
}

#[must_use]
pub fn current_lang() -> Language {
    CURRENT.with(|c| c.borrow().lang)
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    CURRENT.with(|cell| {
        let bundle = cell.borrow();
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Translate a key to the current language, falling back to English and then
/// to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, substituting `{name}` placeholders from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Format a number using the current locale via Intl
#[must_use]
pub fn fmt_number(num: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let locales = Array::new();
        locales.push(&JsValue::from_str(current_lang().tag()));
        let nf = Intl::NumberFormat::new(&locales, &Object::new());
        let format_fn: Function = nf.format();
        format_fn
            .call1(&nf, &JsValue::from_f64(num))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| format!("{num:.0}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        format!("{num:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_bundle_falls_back_to_english_keys() {
        set_lang(Language::De);
        assert_eq!(current_lang(), Language::De);
        assert_eq!(t("hud.next"), "NÄCHSTE ANKUNFT");
        assert_eq!(t("missing.key"), "missing.key");
        set_lang(Language::En);
        assert_eq!(t("hud.next"), "NEXT ARRIVAL");
    }

    #[test]
    fn placeholders_are_substituted() {
        set_lang(Language::En);
        let mut vars = BTreeMap::new();
        vars.insert("percent", "42");
        assert_eq!(tr("hud.remaining", Some(&vars)), "42% REMAINING");
    }

    #[test]
    fn bundles_share_the_same_key_tree() {
        fn keys(prefix: &str, value: &Value, out: &mut Vec<String>) {
            if let Value::Object(map) = value {
                for (k, v) in map {
                    keys(&format!("{prefix}{k}."), v, out);
                }
            } else {
                out.push(prefix.trim_end_matches('.').to_string());
            }
        }
        let mut en = Vec::new();
        let mut de = Vec::new();
        keys("", &load_translations(Language::En).unwrap(), &mut en);
        keys("", &load_translations(Language::De).unwrap(), &mut de);
        assert_eq!(en, de);
    }

    #[test]
    fn numbers_format_without_fraction_natively() {
        assert_eq!(fmt_number(87.6), "88");
    }
}
