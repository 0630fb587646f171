use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub text: AttrValue,
}

/// Announcement strip shown above the track (delays, STOPPED).
#[function_component(Banner)]
pub fn banner(p: &Props) -> Html {
    if p.text.is_empty() {
        return Html::default();
    }
    html! {
        <div class="announcement" role="status" aria-live="polite">
            <p class="announcement__text">{ p.text.clone() }</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn empty_text_renders_nothing() {
        let html = block_on(
            LocalServerRenderer::<Banner>::with_props(Props {
                text: AttrValue::default(),
            })
            .render(),
        );
        assert!(!html.contains("announcement"));
    }

    #[test]
    fn text_is_shown_in_a_live_region() {
        let html = block_on(
            LocalServerRenderer::<Banner>::with_props(Props {
                text: AttrValue::from("🛑 STOPPED"),
            })
            .render(),
        );
        assert!(html.contains("aria-live"));
        assert!(html.contains("STOPPED"));
    }
}
