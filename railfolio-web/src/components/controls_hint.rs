use crate::i18n;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub open: bool,
    pub on_dismiss: Callback<()>,
}

const CONTROLS: &[(&str, &str)] = &[
    ("controls.scroll", "controls.scroll_desc"),
    ("controls.arrows", "controls.arrows_desc"),
    ("controls.horn", "controls.horn_desc"),
    ("controls.restart", "controls.restart_desc"),
    ("controls.click", "controls.click_desc"),
];

/// One-time controls popup shown shortly after a normal departure.
#[function_component(ControlsHint)]
pub fn controls_hint(p: &Props) -> Html {
    if !p.open {
        return Html::default();
    }
    let on_dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <aside class="controls-hint" role="dialog" aria-labelledby="controls-title">
            <h2 id="controls-title">{ i18n::t("controls.title") }</h2>
            <p class="controls-hint__subtitle">{ i18n::t("controls.subtitle") }</p>
            <ul>
                { for CONTROLS.iter().map(|(title, desc)| html! {
                    <li><strong>{ i18n::t(title) }</strong>{" "}<span>{ i18n::t(desc) }</span></li>
                }) }
            </ul>
            <p class="controls-hint__tip">{ i18n::t("controls.tip") }</p>
            <button type="button" id="controls-dismiss" onclick={on_dismiss}>
                { i18n::t("controls.dismiss") }
            </button>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn lists_every_control_when_open() {
        crate::i18n::set_lang(railfolio_core::Language::En);
        let html = block_on(
            LocalServerRenderer::<ControlsHint>::with_props(Props {
                open: true,
                on_dismiss: Callback::noop(),
            })
            .render(),
        );
        assert_eq!(html.matches("<li>").count(), CONTROLS.len());
        assert!(html.contains("Sound the horn"));
        assert!(html.contains("controls-dismiss"));
    }

    #[test]
    fn closed_hint_renders_nothing() {
        let html = block_on(
            LocalServerRenderer::<ControlsHint>::with_props(Props {
                open: false,
                on_dismiss: Callback::noop(),
            })
            .render(),
        );
        assert!(!html.contains("controls-hint"));
    }
}
