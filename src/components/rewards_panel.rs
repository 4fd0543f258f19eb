use crate::util::format_discovered_at;
use fractalix_rewards::{LedgerSnapshot, Reward};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RewardsPanelProps {
    pub show: bool,
    pub title: AttrValue,
    pub snapshot: LedgerSnapshot,
    pub on_close: Callback<()>,
}

fn reward_row(reward: &Reward) -> Html {
    let border = if reward.discovered {
        "border:1px solid rgba(200,200,200,0.3); background:rgba(200,200,200,0.05);"
    } else {
        "border:1px solid rgba(58,58,64,0.3); opacity:0.6;"
    };
    let body = if reward.discovered {
        let promo = if reward.has_benefit() {
            html! {
                <div style="margin-top:8px; background:rgba(8,8,10,0.5); border:1px solid #3a3a40; padding:6px 8px;">
                    <div style="font-size:10px; color:#e8e6e1;">{ reward.benefit }</div>
                    <div style="font-size:9px; color:#7a7a80; margin-top:4px;">
                        {"Код: "}<span style="color:#c8c8c8; user-select:all;">{ reward.code }</span>
                    </div>
                </div>
            }
        } else {
            html! {}
        };
        html! {
            <>
                <div style="font-size:10px; color:#7a7a80; margin-top:4px;">{ reward.description }</div>
                { promo }
                <div style="font-size:8px; color:#5a5a60; margin-top:6px;">{ format_discovered_at(reward.discovered_at) }</div>
            </>
        }
    } else {
        html! {
            <div style="font-size:10px; color:#7a7a80; margin-top:4px;">{ format!("◈ Подсказка: {}", reward.trigger_hint) }</div>
        }
    };
    let icon_color = if reward.discovered { "#c8c8c8" } else { "#3a3a40" };
    html! {
        <div key={reward.id} style={format!("padding:16px; {}", border)}>
            <div style="display:flex; align-items:flex-start; gap:16px;">
                <div style={format!("color:{}; font-size:20px;", icon_color)}>{ reward.icon }</div>
                <div style="flex:1;">
                    <div style="display:flex; align-items:center; justify-content:space-between;">
                        <div style="font-size:14px; color:#e8e6e1;">{ reward.name }</div>
                        if reward.discovered {
                            <span style="font-size:8px; color:#c8c8c8;">{"✓ НАЙДЕНО"}</span>
                        }
                    </div>
                    { body }
                </div>
            </div>
        </div>
    }
}

#[function_component]
pub fn RewardsPanel(props: &RewardsPanelProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let snap = &props.snapshot;
    html! {
        <div onclick={close} style="position:fixed; inset:0; z-index:150; background:rgba(8,8,10,0.9); display:flex; align-items:center; justify-content:center; padding:16px; font-family:monospace;">
            <div onclick={stop} style="background:rgba(20,20,24,0.95); border:1px solid rgba(58,58,64,0.5); max-width:512px; width:100%; max-height:80vh; overflow-y:auto;">
                <div style="padding:16px; border-bottom:1px solid rgba(58,58,64,0.3);">
                    <h2 style="margin:0; font-size:18px; color:#e8e6e1; letter-spacing:0.1em;">{ props.title.clone() }</h2>
                    <p style="margin:4px 0 0 0; font-size:10px; color:#7a7a80;">
                        { format!("{} / {} найдено", snap.total_discovered, snap.all.len()) }
                    </p>
                </div>
                <div style="padding:16px; display:flex; flex-direction:column; gap:12px;">
                    { for snap.all.iter().map(reward_row) }
                </div>
                <div style="padding:16px; border-top:1px solid rgba(58,58,64,0.3); font-size:9px; color:#7a7a80; text-align:center;">
                    {"Используйте коды при оформлении заказа"}
                </div>
            </div>
        </div>
    }
}
