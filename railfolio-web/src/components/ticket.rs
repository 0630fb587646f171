use crate::i18n;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub visible: bool,
    pub origin: AttrValue,
    pub destination: AttrValue,
}

/// Boarding pass revealed at the end of the line.
#[function_component(Ticket)]
pub fn ticket(p: &Props) -> Html {
    if !p.visible {
        return Html::default();
    }
    html! {
        <section class="ticket" aria-labelledby="ticket-title">
            <h2 id="ticket-title">{ i18n::t("ticket.boarding_pass") }</h2>
            <span class="ticket__notice">{ i18n::t("ticket.authorized") }</span>
            <dl>
                <dt>{ i18n::t("ticket.origin") }</dt>
                <dd>{ p.origin.clone() }</dd>
                <dt>{ i18n::t("ticket.destination") }</dt>
                <dd>{ p.destination.clone() }</dd>
            </dl>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn ticket_shows_both_ends_of_the_line() {
        crate::i18n::set_lang(railfolio_core::Language::En);
        let html = block_on(
            LocalServerRenderer::<Ticket>::with_props(Props {
                visible: true,
                origin: AttrValue::from("Taxila"),
                destination: AttrValue::from("Berlin"),
            })
            .render(),
        );
        assert!(html.contains("Boarding Pass"));
        assert!(html.contains("Taxila"));
        assert!(html.contains("Berlin"));
    }
}
