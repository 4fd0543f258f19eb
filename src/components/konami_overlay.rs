use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct KonamiProgressProps {
    /// 0.0..=1.0, see `SequenceMatcher::progress`
    pub progress: f32,
}

/// Thin bar in the corner while the visitor is partway through the code.
#[function_component]
pub fn KonamiProgress(props: &KonamiProgressProps) -> Html {
    if props.progress <= 0.0 || props.progress >= 1.0 {
        return html! {};
    }
    html! {
        <div style="position:fixed; bottom:16px; right:16px; z-index:200;">
            <div style="width:80px; height:4px; background:rgba(58,58,64,0.3); overflow:hidden;">
                <div style={format!("height:100%; width:{:.0}%; background:rgba(200,200,200,0.5); transition:width 0.2s;", props.progress * 100.0)}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct KonamiOverlayProps {
    pub show: bool,
}

#[function_component]
pub fn KonamiOverlay(props: &KonamiOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    html! {
        <div style="position:fixed; inset:0; z-index:300; pointer-events:none; display:flex; align-items:center; justify-content:center; font-family:monospace;">
            <div style="background:rgba(20,20,24,0.95); border:1px solid rgba(200,200,200,0.5); padding:32px 48px; text-align:center;">
                <div style="font-size:30px; color:#e8e6e1; margin-bottom:16px; text-shadow:0 0 10px rgba(255,255,255,0.5);">{"↑↑↓↓←→←→BA"}</div>
                <div style="font-size:14px; color:#c8c8c8; letter-spacing:0.2em;">{"KONAMI CODE ACTIVATED"}</div>
                <div style="font-size:10px; color:#5a5a60; margin-top:8px;">{"You found an easter egg!"}</div>
            </div>
        </div>
    }
}
