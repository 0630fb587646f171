use super::runtime::Frame;
use crate::a11y;
use crate::components::banner::Banner;
use crate::components::controls_hint::ControlsHint;
use crate::components::detail::DetailPanel;
use crate::components::hud::Hud;
use crate::components::intro::IntroOverlay;
use crate::components::ticket::Ticket;
use crate::components::toolbar::Toolbar;
use crate::components::track::Track;
use crate::i18n;
use railfolio_core::{DetailCatalog, Journey, JourneyMode, Language};
use std::rc::Rc;
use yew::prelude::*;

/// Height of the scroll spacer in viewport heights.
pub const SCROLL_SPACER_VH: u32 = 1000;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub frame: Frame,
    pub journey: Rc<Journey>,
    pub catalog: Rc<DetailCatalog>,
    pub on_start: Callback<JourneyMode>,
    pub on_language: Callback<Language>,
    pub on_select: Callback<usize>,
    pub on_close_detail: Callback<()>,
    pub on_toggle_mute: Callback<()>,
    pub on_restart: Callback<()>,
    pub on_dismiss_hint: Callback<()>,
}

/// The whole page for one frame.
#[function_component(JourneyView)]
pub fn journey_view(p: &Props) -> Html {
    let frame = &p.frame;
    let lang = frame.language;

    let intro = (!frame.started).then(|| {
        html! {
            <IntroOverlay
                language={lang}
                on_language={p.on_language.clone()}
                on_start={p.on_start.clone()}
            />
        }
    });

    let chrome = frame.started.then(|| {
        let origin = p
            .journey
            .stations()
            .first()
            .map(|s| s.content.institution(lang).to_string())
            .unwrap_or_default();
        html! {
            <>
                <Hud snapshot={frame.hud.clone()} progress={frame.displayed} />
                <Banner text={AttrValue::from(frame.announcement.clone())} />
                <Toolbar
                    muted={frame.muted}
                    on_toggle_mute={p.on_toggle_mute.clone()}
                    on_restart={p.on_restart.clone()}
                />
                <Ticket
                    visible={frame.hud.ticket_visible}
                    origin={AttrValue::from(origin)}
                    destination={AttrValue::from(lang.final_destination())}
                />
                <ControlsHint open={frame.controls_hint} on_dismiss={p.on_dismiss_hint.clone()} />
            </>
        }
    });

    let detail = frame
        .detail
        .and_then(|index| p.journey.station(index))
        .map(|station| {
            html! {
                <DetailPanel
                    station={station.clone()}
                    content={p.catalog.content_for(station.id()).clone()}
                    skills={p.journey.skills().clone()}
                    language={lang}
                    on_close={p.on_close_detail.clone()}
                />
            }
        });

    html! {
        <main class={classes!("journey", frame.demo.then_some("journey--demo"))} lang={lang.tag()}>
            <style>{ a11y::visible_focus_css() }</style>
            <div id={a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"
                aria-label={i18n::t("app.live_region")}></div>
            { intro }
            { chrome }
            <div class="stage">
                <Track
                    journey={p.journey.clone()}
                    language={lang}
                    translation={frame.translation}
                    current_station={frame.current_station}
                    on_select={p.on_select.clone()}
                />
            </div>
            { detail }
            <div class="scroll-spacer" aria-hidden="true"
                style={format!("height:{SCROLL_SPACER_VH}vh")}></div>
        </main>
    }
}
