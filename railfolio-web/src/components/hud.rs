use crate::i18n;
use railfolio_core::{HudSnapshot, Region};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub snapshot: HudSnapshot,
    /// Displayed progress in `[0, 1]`, drives the rail bar.
    pub progress: f64,
}

fn region_label(region: Region) -> String {
    match region {
        Region::Pakistan => i18n::t("hud.region.pakistan"),
        Region::Germany => i18n::t("hud.region.germany"),
    }
}

const fn region_class(region: Region) -> &'static str {
    match region {
        Region::Pakistan => "hud--pakistan",
        Region::Germany => "hud--germany",
    }
}

#[function_component(Hud)]
pub fn hud(p: &Props) -> Html {
    let hud = &p.snapshot;
    let heading = if hud.at_origin {
        i18n::t("hud.origin")
    } else {
        i18n::t("hud.next")
    };
    let percent = i18n::fmt_number(hud.remaining_percent);
    let mut vars = BTreeMap::new();
    vars.insert("percent", percent.as_str());
    let remaining = i18n::tr("hud.remaining", Some(&vars));
    let state = if hud.stopped {
        i18n::t("hud.stationary")
    } else {
        i18n::t("hud.mainline")
    };
    let bar_width = format!("width:{:.2}%", p.progress.clamp(0.0, 1.0) * 100.0);

    html! {
        <header class={classes!("hud", region_class(hud.region))} aria-label={i18n::t("app.name")}>
            <div class="hud__badge">
                <span class="hud__role">{ i18n::t("app.engineer") }</span>
                <span class="hud__region">{ region_label(hud.region) }</span>
            </div>
            <div class="hud__destination">
                <span class="hud__heading">{ heading }</span>
                <strong class="hud__station">{ hud.station_label.clone() }</strong>
            </div>
            <div class="hud__telemetry">
                <dl>
                    <dt>{ i18n::t("hud.velocity") }</dt>
                    <dd class="hud__speed">{ i18n::fmt_number(hud.speed) }</dd>
                    <dt>{ i18n::t("hud.distance") }</dt>
                    <dd class="hud__remaining">{ remaining }</dd>
                    <dt>{ i18n::t("hud.state") }</dt>
                    <dd class="hud__state">{ state }</dd>
                </dl>
            </div>
            <div class="hud__rail" role="progressbar"
                aria-valuemin="0" aria-valuemax="100"
                aria-valuenow={format!("{:.0}", p.progress.clamp(0.0, 1.0) * 100.0)}>
                <div class="hud__rail-fill" style={bar_width}></div>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use railfolio_core::Language;
    use yew::LocalServerRenderer;

    fn snapshot(stopped: bool, region: Region) -> HudSnapshot {
        HudSnapshot {
            next_station: Some(2),
            station_label: "Logicator Station".to_string(),
            at_origin: false,
            region,
            remaining_percent: 62.0,
            speed: if stopped { 0.0 } else { 12.0 },
            stopped,
            ticket_visible: false,
        }
    }

    #[test]
    fn moving_train_shows_next_arrival() {
        i18n::set_lang(Language::En);
        let html = block_on(
            LocalServerRenderer::<Hud>::with_props(Props {
                snapshot: snapshot(false, Region::Pakistan),
                progress: 0.38,
            })
            .render(),
        );
        assert!(html.contains("NEXT ARRIVAL"));
        assert!(html.contains("Logicator Station"));
        assert!(html.contains("62% REMAINING"));
        assert!(html.contains("MAINLINE_CLEAR"));
        assert!(html.contains("hud--pakistan"));
    }

    #[test]
    fn stopped_train_in_germany_reads_stationary() {
        i18n::set_lang(Language::De);
        let html = block_on(
            LocalServerRenderer::<Hud>::with_props(Props {
                snapshot: snapshot(true, Region::Germany),
                progress: 0.9,
            })
            .render(),
        );
        assert!(html.contains("STILLSTAND"));
        assert!(html.contains("Deutschland"));
        assert!(html.contains("hud--germany"));
        i18n::set_lang(Language::En);
    }
}
