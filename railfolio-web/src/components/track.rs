use railfolio_core::{Journey, Language, StationKind};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub journey: Rc<Journey>,
    pub language: Language,
    /// Horizontal track offset in pixels (negative slides left).
    pub translation: f64,
    #[prop_or_default]
    pub current_station: Option<usize>,
    #[prop_or_default]
    pub on_select: Callback<usize>,
}

const fn kind_class(kind: StationKind) -> &'static str {
    match kind {
        StationKind::Education => "station--education",
        StationKind::Freelance => "station--freelance",
        StationKind::Professional => "station--professional",
        StationKind::Transition => "station--transition",
        StationKind::Current => "station--current",
    }
}

/// The sliding track with one clickable sign per station.
#[function_component(Track)]
pub fn track(p: &Props) -> Html {
    let style = format!(
        "width:{:.0}px;transform:translateX({:.2}px)",
        p.journey.track_length(),
        p.translation
    );
    let stations = p.journey.stations().iter().map(|station| {
        let index = station.index;
        let content = &station.content;
        let onclick = {
            let cb = p.on_select.clone();
            Callback::from(move |_: MouseEvent| cb.emit(index))
        };
        let active = p.current_station == Some(index);
        html! {
            <li
                key={content.id.clone()}
                class={classes!("station", kind_class(content.kind), active.then_some("station--active"))}
                style={format!("left:{:.0}px", station.center_offset)}
            >
                <button type="button" class="station__sign" {onclick}
                    aria-pressed={active.to_string()}>
                    <span class="station__year">{ content.year.clone() }</span>
                    <span class="station__title">{ content.title(p.language).to_string() }</span>
                    <span class="station__subtitle">{ content.subtitle(p.language).to_string() }</span>
                </button>
            </li>
        }
    });

    html! {
        <div class="track-viewport">
            <ol class="track" {style}>
                { for stations }
            </ol>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use railfolio_core::{JourneyCfg, StationData};
    use yew::LocalServerRenderer;

    fn journey() -> Rc<Journey> {
        let cfg = JourneyCfg::default_config();
        Rc::new(Journey::new(StationData::load_from_static().unwrap(), &cfg.layout).unwrap())
    }

    #[test]
    fn every_station_gets_a_sign_in_order() {
        let html = block_on(
            LocalServerRenderer::<Track>::with_props(Props {
                journey: journey(),
                language: Language::En,
                translation: -1200.0,
                current_station: Some(0),
                on_select: Callback::noop(),
            })
            .render(),
        );
        assert_eq!(html.matches("station__sign").count(), 8);
        assert!(html.contains("translateX(-1200.00px)"));
        assert!(html.contains("station--active"));
        let taxila = html.find("UET Taxila Station").unwrap();
        let berlin = html.find("station--current").unwrap();
        assert!(taxila < berlin);
    }

    #[test]
    fn german_titles_are_used() {
        let html = block_on(
            LocalServerRenderer::<Track>::with_props(Props {
                journey: journey(),
                language: Language::De,
                translation: 0.0,
                current_station: None,
                on_select: Callback::noop(),
            })
            .render(),
        );
        assert!(html.contains("Bahnhof UET Taxila"));
        assert!(!html.contains("station--active"));
    }
}
