use super::runtime::{Frame, MAX_TICK_MS, Overlay, PageAction, TICK_INTERVAL_MS};
use super::view::JourneyView;
use crate::components::detail::DETAIL_BODY_ID;
use crate::host::{WebAudio, WebSpeech};
use crate::{a11y, dom, i18n, input};
use railfolio_core::numbers::elapsed_millis;
use railfolio_core::{
    DetailCatalog, JourneyMode, JourneySession, Language, StaticDataLoader, Viewport,
    build_session,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, KeyboardEvent};
use yew::prelude::*;

type WebSession = JourneySession<WebAudio, WebSpeech>;

#[derive(Clone)]
struct SessionHandle(Rc<RefCell<WebSession>>);

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone)]
struct Shared {
    session: Rc<RefCell<WebSession>>,
    overlay: Rc<RefCell<Overlay>>,
    frame: UseStateHandle<Frame>,
}

impl Shared {
    /// Drain engine effects into the page and publish a fresh frame.
    fn pump(&self) {
        let (actions, frame) = {
            let mut session = self.session.borrow_mut();
            let mut overlay = self.overlay.borrow_mut();
            let actions = overlay.apply(session.drain_effects());
            (actions, overlay.decorate(Frame::capture(&session)))
        };
        for action in actions {
            perform(action);
        }
        self.frame.set(frame);
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut WebSession) -> R) -> R {
        let out = f(&mut self.session.borrow_mut());
        self.pump();
        out
    }

    fn callback<T: 'static>(&self, f: impl Fn(&Self, T) + 'static) -> Callback<T> {
        let shared = self.clone();
        Callback::from(move |value| f(&shared, value))
    }
}

fn perform(action: PageAction) {
    match action {
        PageAction::ScrollTo(y) => dom::scroll_page_to(y),
        PageAction::ScrollBy { delta, smooth } => dom::scroll_page_by(delta, smooth),
        PageAction::ScrollDetail(top) => dom::scroll_element(DETAIL_BODY_ID, top),
        PageAction::Announce(text) => a11y::set_status(&text),
    }
}

fn sync_viewport(shared: &Shared) {
    if let Some((width, height, scroll_height)) = dom::page_metrics() {
        shared.with_session(|s| s.resize(Viewport::new(width, height, scroll_height)));
    }
}

/// Window listeners and the motion interval; removed on drop.
struct Wiring {
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl Drop for Wiring {
    fn drop(&mut self) {
        let Some(win) = dom::window() else {
            return;
        };
        for (name, closure) in &self.listeners {
            let _ = win.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        if let Some((id, _)) = &self.interval {
            win.clear_interval_with_handle(*id);
        }
    }
}

fn install(shared: &Shared) -> Wiring {
    let mut wiring = Wiring {
        listeners: Vec::new(),
        interval: None,
    };
    let Some(win) = dom::window() else {
        dom::console_error("journey wiring skipped: window unavailable");
        return wiring;
    };
    sync_viewport(shared);

    let on_scroll = {
        let shared = shared.clone();
        Closure::wrap(Box::new(move |_: Event| {
            if let Some(y) = dom::scroll_y() {
                shared.with_session(|s| s.on_scroll(y));
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let on_resize = {
        let shared = shared.clone();
        Closure::wrap(Box::new(move |_: Event| sync_viewport(&shared)) as Box<dyn FnMut(Event)>)
    };
    let on_keydown = {
        let shared = shared.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let Some(command) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|key| input::key_to_command(&key.key()))
            else {
                return;
            };
            let outcome = shared.with_session(|s| s.command(command));
            if outcome.is_handled() && input::suppresses_default(command) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>)
    };

    for (name, closure) in [
        ("scroll", on_scroll),
        ("resize", on_resize),
        ("keydown", on_keydown),
    ] {
        match win.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            Ok(()) => wiring.listeners.push((name, closure)),
            Err(err) => dom::console_error(&format!(
                "failed to listen for {name}: {}",
                dom::js_error_message(&err)
            )),
        }
    }

    let last = Rc::new(Cell::new(js_sys::Date::now()));
    let tick = {
        let shared = shared.clone();
        Closure::wrap(Box::new(move || {
            let now = js_sys::Date::now();
            let elapsed = elapsed_millis(last.get(), now).min(MAX_TICK_MS);
            last.set(now);
            if elapsed > 0 {
                shared.with_session(|s| s.advance(elapsed));
            }
        }) as Box<dyn FnMut()>)
    };
    match win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS,
    ) {
        Ok(id) => wiring.interval = Some((id, tick)),
        Err(err) => dom::console_error(&format!(
            "failed to start the motion loop: {}",
            dom::js_error_message(&err)
        )),
    }
    wiring
}

#[derive(Properties, Clone, PartialEq)]
struct LiveProps {
    session: SessionHandle,
}

#[function_component(LiveJourney)]
fn live_journey(p: &LiveProps) -> Html {
    let session = p.session.0.clone();
    let overlay = use_mut_ref(Overlay::default);
    let frame = {
        let session = session.clone();
        use_state_eq(move || Frame::capture(&session.borrow()))
    };
    let journey = {
        let session = session.clone();
        use_memo((), move |()| session.borrow().journey().clone())
    };
    let catalog = use_memo((), |()| DetailCatalog::default_catalog());
    let shared = Shared {
        session,
        overlay,
        frame: frame.clone(),
    };

    {
        let shared = shared.clone();
        use_effect_with((), move |()| {
            let wiring = install(&shared);
            move || drop(wiring)
        });
    }

    let on_start = shared.callback(|shared, mode: JourneyMode| {
        shared.overlay.borrow_mut().dismiss_hint();
        let result = shared.with_session(|s| {
            s.speech().prime();
            let language = s.language();
            s.start(mode, language)
        });
        if let Err(err) = result {
            log::error!("journey failed to start: {err}");
        }
    });
    let on_language = shared.callback(|shared, lang: Language| {
        log::debug!("narration language set to {lang}");
        i18n::set_lang(lang);
        shared.with_session(|s| s.set_language(lang));
    });
    let on_select = shared.callback(|shared, index: usize| {
        shared.with_session(|s| s.select_station(index));
    });
    let on_close_detail = shared.callback(|shared, ()| {
        shared.with_session(|s| s.close_detail());
    });
    let on_toggle_mute = shared.callback(|shared, ()| {
        shared.with_session(|s| s.set_muted(!s.is_muted()));
    });
    let on_restart = shared.callback(|shared, ()| {
        shared.with_session(|s| s.restart());
    });
    let on_dismiss_hint = shared.callback(|shared, ()| {
        shared.overlay.borrow_mut().dismiss_hint();
        shared.pump();
    });

    html! {
        <JourneyView
            frame={(*frame).clone()}
            {journey}
            {catalog}
            {on_start}
            {on_language}
            {on_select}
            {on_close_detail}
            {on_toggle_mute}
            {on_restart}
            {on_dismiss_hint}
        />
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_memo((), |()| {
        build_session(&StaticDataLoader, WebAudio::new(), WebSpeech::new())
            .map(|session| SessionHandle(Rc::new(RefCell::new(session))))
            .map_err(|err| {
                let message = format!("journey failed to load: {err}");
                dom::console_error(&message);
                message
            })
    });
    match session.as_ref() {
        Ok(handle) => html! { <LiveJourney session={handle.clone()} /> },
        Err(message) => html! { <p class="load-error" role="alert">{ message.clone() }</p> },
    }
}
