//! Station detail view.
//!
//! The body element carries [`DETAIL_BODY_ID`] so the guided tour can scroll it.

use crate::i18n;
use railfolio_core::{DetailContent, Language, ReviewSource, Station};
use std::collections::BTreeMap;
use yew::prelude::*;

pub const DETAIL_BODY_ID: &str = "station-detail-body";

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub station: Station,
    pub content: DetailContent,
    pub skills: BTreeMap<String, Vec<String>>,
    pub language: Language,
    pub on_close: Callback<()>,
}

fn stack_list(groups: impl Iterator<Item = (String, Vec<String>)>) -> Html {
    html! {
        <dl class="detail__stack">
            { for groups.map(|(label, items)| html! {
                <>
                    <dt>{ label }</dt>
                    <dd>
                        <ul class="detail__chips">
                            { for items.into_iter().map(|item| html! { <li>{ item }</li> }) }
                        </ul>
                    </dd>
                </>
            }) }
        </dl>
    }
}

fn extra_section(content: &DetailContent, skills: &BTreeMap<String, Vec<String>>) -> Html {
    match content {
        DetailContent::Summary => Html::default(),
        DetailContent::Reviews { source } => {
            let (title, subtitle) = match source {
                ReviewSource::Fiverr => ("detail.reviews.fiverr", "detail.reviews.fiverr_sub"),
                ReviewSource::LinkedIn => {
                    ("detail.reviews.linkedin", "detail.reviews.linkedin_sub")
                }
            };
            html! {
                <section class="detail__reviews">
                    <h4>{ i18n::t(title) }</h4>
                    <p>{ i18n::t(subtitle) }</p>
                </section>
            }
        }
        DetailContent::TechStack => html! {
            <section class="detail__tech">
                <h4>{ i18n::t("detail.tech_stack") }</h4>
                { stack_list(skills.iter().map(|(group, items)| {
                    (i18n::t(&format!("skills.{group}")), items.clone())
                })) }
            </section>
        },
        DetailContent::DeepDive { heading_key, stack } => html! {
            <section class="detail__deep-dive">
                <h4>{ i18n::t(heading_key) }</h4>
                { stack_list(stack.iter().map(|(label, items)| {
                    ((*label).to_string(), items.iter().map(|s| (*s).to_string()).collect())
                })) }
            </section>
        },
    }
}

#[function_component(DetailPanel)]
pub fn detail_panel(p: &Props) -> Html {
    let lang = p.language;
    let content = &p.station.content;
    let on_close = {
        let cb = p.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = p.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let title_id = format!("detail-title-{}", p.station.index);

    html! {
        <div class="modal-backdrop" role="presentation">
            <div class="modal detail" role="dialog" aria-modal="true"
                aria-labelledby={title_id.clone()} onkeydown={on_keydown}>
                <div class="modal__header">
                    <div>
                        <span class="detail__year">{ content.year.clone() }</span>
                        <h2 id={title_id}>{ content.title(lang).to_string() }</h2>
                        <p class="detail__subtitle">
                            { content.subtitle(lang).to_string() }{" · "}{ content.institution(lang).to_string() }
                        </p>
                    </div>
                    <button type="button" class="modal__close"
                        aria-label={i18n::t("detail.close")} onclick={on_close}>
                        {"X"}
                    </button>
                </div>
                <div id={DETAIL_BODY_ID} class="modal__body">
                    <p class="detail__description">{ content.description(lang).to_string() }</p>
                    <h3>{ i18n::t("detail.highlights") }</h3>
                    <ul class="detail__highlights">
                        { for content.highlights(lang).iter().map(|h| html! { <li>{ h.clone() }</li> }) }
                    </ul>
                    { extra_section(&p.content, &p.skills) }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use railfolio_core::{DetailCatalog, Journey, JourneyCfg, StationData};
    use yew::LocalServerRenderer;

    fn render(id: &str, language: Language) -> String {
        i18n::set_lang(language);
        let cfg = JourneyCfg::default_config();
        let journey = Journey::new(StationData::load_from_static().unwrap(), &cfg.layout).unwrap();
        let station = journey.station(journey.index_of(id).unwrap()).unwrap().clone();
        let content = DetailCatalog::default_catalog().content_for(id).clone();
        let html = block_on(
            LocalServerRenderer::<DetailPanel>::with_props(Props {
                station,
                content,
                skills: journey.skills().clone(),
                language,
                on_close: Callback::noop(),
            })
            .render(),
        );
        i18n::set_lang(Language::En);
        html
    }

    #[test]
    fn berlin_lists_the_skill_matrix() {
        let html = render("berlin", Language::En);
        assert!(html.contains(DETAIL_BODY_ID));
        assert!(html.contains("Tech Stack"));
        assert!(html.contains("Languages"));
        assert!(html.contains("Databases"));
    }

    #[test]
    fn review_stations_name_their_source() {
        assert!(render("freelance", Language::En).contains("Client Reviews"));
        assert!(render("nova", Language::De).contains("Teamempfehlungen"));
    }

    #[test]
    fn deep_dive_uses_localized_heading_and_stack() {
        let html = render("softoo", Language::De);
        assert!(html.contains("KI-Compliance"));
        assert!(html.contains("LangChain"));
        assert!(html.contains("aria-modal"));
    }
}
