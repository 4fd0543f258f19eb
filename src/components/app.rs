use super::{
    hub::Hub,
    konami_overlay::{KonamiOverlay, KonamiProgress},
    reward_toast::RewardToast,
    rewards_panel::RewardsPanel,
};
use crate::util::{clear_timeout, set_timeout};
use fractalix_rewards::catalog::ids;
use fractalix_rewards::storage::default_store;
use fractalix_rewards::triggers::{DistinctVisitTrigger, DwellTrigger, is_at_bottom, time_gated_rewards};
use fractalix_rewards::{
    BrowserStorage, Clock, FlagAction, RewardLedger, RewardsConfig, SequenceMatcher, SystemClock,
    TimedFlag, ToastAction, ToastSlot, achievements, hidden_rewards,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum Panel {
    Closed,
    Rewards,
    Achievements,
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| RewardsConfig::load(&BrowserStorage));
    let rewards = {
        let key = config.rewards_key.clone();
        use_mut_ref(move || RewardLedger::new(hidden_rewards(), default_store(), SystemClock, key))
    };
    let badges = {
        let key = config.achievements_key.clone();
        use_mut_ref(move || RewardLedger::new(achievements(), default_store(), SystemClock, key))
    };
    let rewards_view = {
        let rewards = rewards.clone();
        use_state(move || rewards.borrow().query())
    };
    let badges_view = {
        let badges = badges.clone();
        use_state(move || badges.borrow().query())
    };
    let toast = use_reducer(ToastSlot::default);
    let panel = use_state(|| Panel::Closed);
    let konami = use_mut_ref(SequenceMatcher::konami);
    let konami_progress = use_state(|| 0.0_f32);
    let konami_active = use_reducer(TimedFlag::default);
    let dwell = {
        let secs = config.long_read_secs;
        use_mut_ref(move || DwellTrigger::new(secs))
    };
    let ctas = {
        let required = config.cta_required;
        use_mut_ref(move || DistinctVisitTrigger::new(required))
    };
    let menu = {
        let required = config.menu_items.len();
        use_mut_ref(move || DistinctVisitTrigger::new(required))
    };

    // Both catalogs are offered every id; the one that does not own it answers NotFound.
    let discover = {
        let rewards = rewards.clone();
        let badges = badges.clone();
        let rewards_view = rewards_view.clone();
        let badges_view = badges_view.clone();
        Callback::from(move |id: &'static str| {
            let outcome = rewards.borrow_mut().discover(id);
            if outcome.is_new() {
                rewards_view.set(rewards.borrow().query());
            }
            let outcome = badges.borrow_mut().discover(id);
            if outcome.is_new() {
                badges_view.set(badges.borrow().query());
            }
        })
    };

    // Discovery toasts
    {
        let rewards = rewards.clone();
        let badges = badges.clone();
        let dispatcher = toast.dispatcher();
        use_effect_with((), move |_| {
            let subs: Vec<_> = [&rewards, &badges]
                .into_iter()
                .map(|ledger| {
                    let dispatcher = dispatcher.clone();
                    ledger
                        .borrow_mut()
                        .subscribe(move |r| dispatcher.dispatch(ToastAction::Show(r.clone())))
                })
                .collect();
            move || {
                rewards.borrow_mut().unsubscribe(subs[0]);
                badges.borrow_mut().unsubscribe(subs[1]);
            }
        });
    }
    // Auto-dismiss; a manual close or newer toast changes the token first
    {
        let dispatcher = toast.dispatcher();
        let ms = config.notification_ms();
        use_effect_with(toast.token(), move |token| {
            let handle = token.map(|t| set_timeout(ms, move || dispatcher.dispatch(ToastAction::Expire(t))));
            move || clear_timeout(handle.flatten())
        });
    }

    // Konami overlay; re-entering the code re-arms with a fresh token
    {
        let dispatcher = konami_active.dispatcher();
        let ms = config.konami_overlay_secs.saturating_mul(1000);
        use_effect_with(konami_active.token(), move |token| {
            let handle = token.map(|t| set_timeout(ms, move || dispatcher.dispatch(FlagAction::Expire(t))));
            move || clear_timeout(handle.flatten())
        });
    }

    // Page-load and ambient triggers: clock, dwell timer, scroll, keyboard
    {
        let discover = discover.clone();
        let dwell = dwell.clone();
        let konami = konami.clone();
        let konami_progress = konami_progress.clone();
        let konami_flag = konami_active.dispatcher();
        let config = config.clone();
        use_effect_with((), move |_| {
            let Some(window) = web_sys::window() else {
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            };

            let hour = SystemClock.local_hour();
            let mut night_timer = None;
            for id in time_gated_rewards(hour) {
                if id == ids::NIGHT_VISITOR {
                    let d = discover.clone();
                    night_timer = set_timeout(config.night_visitor_delay_ms, move || d.emit(id));
                } else {
                    discover.emit(id);
                }
            }

            let tick = {
                let discover = discover.clone();
                Closure::wrap(Box::new(move || {
                    if dwell.borrow_mut().tick() {
                        discover.emit(ids::LONG_READER);
                    }
                }) as Box<dyn FnMut()>)
            };
            let interval = window
                .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), 1000)
                .ok();

            let scroll_cb = {
                let discover = discover.clone();
                let window = window.clone();
                let epsilon = config.scroll_epsilon_px;
                Closure::wrap(Box::new(move |_: web_sys::Event| {
                    let Some(root) = window.document().and_then(|d| d.document_element()) else {
                        return;
                    };
                    if is_at_bottom(
                        root.scroll_top() as f64,
                        root.client_height() as f64,
                        root.scroll_height() as f64,
                        epsilon,
                    ) {
                        discover.emit(ids::SCROLL_MASTER);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("scroll", scroll_cb.as_ref().unchecked_ref())
                .ok();

            let keydown_cb = {
                let discover = discover.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let mut matcher = konami.borrow_mut();
                    let matched = matcher.feed(e.code());
                    konami_progress.set(matcher.progress());
                    drop(matcher);
                    if matched {
                        tracing::info!("konami code entered");
                        konami_flag.dispatch(FlagAction::Raise);
                        discover.emit(ids::KONAMI_MASTER);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();

            Box::new(move || {
                clear_timeout(night_timer);
                if let Some(id) = interval {
                    window.clear_interval_with_handle(id);
                }
                let _ = window.remove_event_listener_with_callback("scroll", scroll_cb.as_ref().unchecked_ref());
                let _ = window.remove_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
                drop(scroll_cb);
                drop(keydown_cb);
                drop(tick);
            }) as Box<dyn FnOnce()>
        });
    }

    let cta_hover = {
        let ctas = ctas.clone();
        let discover = discover.clone();
        Callback::from(move |id: String| {
            if ctas.borrow_mut().visit(&id) {
                discover.emit(ids::CONTACT_READY);
            }
        })
    };
    let menu_open = {
        let menu = menu.clone();
        let discover = discover.clone();
        Callback::from(move |id: String| {
            tracing::debug!(item = %id, "menu item opened");
            if menu.borrow_mut().visit(&id) {
                discover.emit(ids::MENU_MASTER);
            }
        })
    };
    let close_toast = {
        let dispatcher = toast.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss))
    };
    let open_panel = |which: Panel| {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| panel.set(which))
    };
    let close_panel = {
        let panel = panel.clone();
        Callback::from(move |_| panel.set(Panel::Closed))
    };
    let counter = "font-family:monospace; font-size:11px; background:rgba(20,20,24,0.9); color:#c8c8c8; border:1px solid #3a3a40; padding:6px 10px; cursor:pointer;";

    html! {
        <div id="root" style="background:#08080a; color:#e8e6e1;">
            <div id="top-bar" style="position:fixed; top:12px; right:12px; display:flex; gap:8px; z-index:100;">
                <button style={counter} onclick={open_panel(Panel::Rewards)}>
                    { format!("◈ {}/{}", rewards_view.total_discovered, rewards_view.all.len()) }
                </button>
                <button style={counter} onclick={open_panel(Panel::Achievements)}>
                    { format!("🏆 {}/{}", badges_view.total_discovered, badges_view.all.len()) }
                </button>
            </div>
            <Hub
                discover={discover.clone()}
                cta_hover={cta_hover}
                menu_open={menu_open}
                menu_items={config.menu_items.clone()}
            />
            <RewardToast reward={toast.visible().cloned()} on_close={close_toast} />
            <RewardsPanel
                show={*panel == Panel::Rewards}
                title="СКРЫТЫЕ НАГРАДЫ"
                snapshot={(*rewards_view).clone()}
                on_close={close_panel.clone()}
            />
            <RewardsPanel
                show={*panel == Panel::Achievements}
                title="ДОСТИЖЕНИЯ"
                snapshot={(*badges_view).clone()}
                on_close={close_panel}
            />
            <KonamiProgress progress={*konami_progress} />
            <KonamiOverlay show={konami_active.is_up()} />
        </div>
    }
}
