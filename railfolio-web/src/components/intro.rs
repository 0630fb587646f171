use crate::i18n;
use railfolio_core::{JourneyMode, Language};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub language: Language,
    pub on_language: Callback<Language>,
    pub on_start: Callback<JourneyMode>,
}

/// Departure board shown before the journey starts.
#[function_component(IntroOverlay)]
pub fn intro_overlay(p: &Props) -> Html {
    let lang_button = |lang: Language, label: &'static str| {
        let cb = p.on_language.clone();
        let active = p.language == lang;
        html! {
            <button type="button"
                class={classes!("intro__lang", active.then_some("intro__lang--active"))}
                aria-pressed={active.to_string()}
                onclick={Callback::from(move |_: MouseEvent| cb.emit(lang))}>
                { label }
            </button>
        }
    };
    let on_depart = {
        let cb = p.on_start.clone();
        Callback::from(move |_: MouseEvent| cb.emit(JourneyMode::normal()))
    };
    let on_tour = {
        let cb = p.on_start.clone();
        Callback::from(move |_: MouseEvent| cb.emit(JourneyMode::GuidedDemo))
    };

    html! {
        <div class="intro" role="dialog" aria-modal="true" aria-labelledby="intro-title">
            <div class="intro__langs" role="group">
                { lang_button(Language::En, "EN") }
                { lang_button(Language::De, "DE") }
            </div>
            <h1 id="intro-title" class="intro__title">{ i18n::t("app.name") }</h1>
            <p class="intro__journey">{ i18n::t("intro.journey") }</p>
            <div class="intro__actions">
                <button type="button" id="depart-btn" class="intro__start" onclick={on_depart}>
                    { i18n::t("intro.start") }
                </button>
                <button type="button" id="tour-btn" class="intro__tour" onclick={on_tour}>
                    { i18n::t("intro.tour") }
                </button>
            </div>
            <dl class="intro__board">
                <dt>{ i18n::t("intro.platform") }</dt><dd>{"5"}</dd>
                <dt>{ i18n::t("intro.mode") }</dt><dd>{ i18n::t("intro.interactive") }</dd>
                <dt>{ i18n::t("intro.service") }</dt><dd>{ i18n::t("intro.exclusive") }</dd>
            </dl>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn board_offers_both_departures() {
        i18n::set_lang(Language::En);
        let html = block_on(
            LocalServerRenderer::<IntroOverlay>::with_props(Props {
                language: Language::En,
                on_language: Callback::noop(),
                on_start: Callback::noop(),
            })
            .render(),
        );
        assert!(html.contains("depart-btn"));
        assert!(html.contains("Start Guided Journey"));
        assert!(html.contains("intro__lang--active"));
    }

    #[test]
    fn german_board_is_translated() {
        i18n::set_lang(Language::De);
        let html = block_on(
            LocalServerRenderer::<IntroOverlay>::with_props(Props {
                language: Language::De,
                on_language: Callback::noop(),
                on_start: Callback::noop(),
            })
            .render(),
        );
        assert!(html.contains("ABFAHRT / START"));
        assert!(html.contains("GLEIS"));
        i18n::set_lang(Language::En);
    }
}
