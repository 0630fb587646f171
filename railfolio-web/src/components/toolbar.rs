use crate::i18n;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub muted: bool,
    pub on_toggle_mute: Callback<()>,
    pub on_restart: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(p: &Props) -> Html {
    let on_mute = {
        let cb = p.on_toggle_mute.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_restart = {
        let cb = p.on_restart.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let (mute_label, mute_icon) = if p.muted {
        (i18n::t("toolbar.unmute"), "🔇")
    } else {
        (i18n::t("toolbar.mute"), "🔊")
    };
    html! {
        <nav class="toolbar">
            <button type="button" id="mute-btn" aria-label={mute_label}
                aria-pressed={p.muted.to_string()} onclick={on_mute}>
                { mute_icon }
            </button>
            <button type="button" id="restart-btn" aria-label={i18n::t("toolbar.restart")}
                onclick={on_restart}>
                {"↺"}
            </button>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn mute_button_reflects_state() {
        crate::i18n::set_lang(railfolio_core::Language::En);
        let render = |muted| {
            block_on(
                LocalServerRenderer::<Toolbar>::with_props(Props {
                    muted,
                    on_toggle_mute: Callback::noop(),
                    on_restart: Callback::noop(),
                })
                .render(),
            )
        };
        assert!(render(true).contains("Unmute sound"));
        assert!(render(false).contains("Mute sound"));
        assert!(render(false).contains("restart-btn"));
    }
}
