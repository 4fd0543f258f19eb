use fractalix_rewards::Reward;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RewardToastProps {
    pub reward: Option<Reward>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn RewardToast(props: &RewardToastProps) -> Html {
    let Some(reward) = props.reward.clone() else {
        return html! {};
    };
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let promo = if reward.has_benefit() {
        html! {
            <div style="background:rgba(8,8,10,0.5); border:1px solid #3a3a40; padding:8px 12px;">
                <div style="font-size:9px; color:#7a7a80; margin-bottom:4px;">{"ВАША НАГРАДА:"}</div>
                <div style="font-size:12px; color:#e8e6e1;">{ reward.benefit }</div>
                <div style="font-size:10px; color:#7a7a80; margin-top:8px;">
                    {"Код: "}<span style="color:#c8c8c8; user-select:all;">{ reward.code }</span>
                </div>
            </div>
        }
    } else {
        html! {}
    };
    html! {
        <div style="position:fixed; top:96px; left:50%; transform:translateX(-50%); z-index:200; font-family:monospace;">
            <div style="position:relative; background:rgba(20,20,24,0.95); border:1px solid rgba(200,200,200,0.3); padding:20px 24px; max-width:384px;">
                <div style="display:flex; align-items:flex-start; gap:16px;">
                    <div style="color:#c8c8c8; margin-top:4px; font-size:20px;">{ reward.icon }</div>
                    <div>
                        <div style="font-size:10px; color:#c8c8c8; letter-spacing:0.2em; margin-bottom:4px;">{"◈ НАГРАДА НАЙДЕНА"}</div>
                        <div style="font-size:14px; color:#e8e6e1; margin-bottom:4px;">{ reward.name }</div>
                        <div style="font-size:10px; color:#7a7a80; margin-bottom:12px;">{ reward.description }</div>
                        { promo }
                    </div>
                </div>
                <button onclick={close} style="position:absolute; top:8px; right:8px; background:none; border:none; color:#7a7a80; cursor:pointer;">{"✕"}</button>
            </div>
        </div>
    }
}
