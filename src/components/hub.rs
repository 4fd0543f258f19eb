use fractalix_rewards::catalog::ids;
use yew::prelude::*;

/// Landing hub stand-ins for the interactive visuals. Each one forwards the
/// visitor's interaction as a reward trigger.
#[derive(Properties, PartialEq, Clone)]
pub struct HubProps {
    pub discover: Callback<&'static str>,
    pub cta_hover: Callback<String>,
    pub menu_open: Callback<String>,
    pub menu_items: Vec<String>,
}

const CTAS: [(&str, &str); 3] = [
    ("start", "НАЧАТЬ ПРОЕКТ"),
    ("brief", "ОТПРАВИТЬ БРИФ"),
    ("call", "ЗАКАЗАТЬ ЗВОНОК"),
];

#[function_component]
pub fn Hub(props: &HubProps) -> Html {
    let on_sphere = {
        let d = props.discover.clone();
        Callback::from(move |_: MouseEvent| d.emit(ids::FIRST_CLICK))
    };
    let on_globe = {
        let d = props.discover.clone();
        Callback::from(move |_: MouseEvent| d.emit(ids::GLOBE_EXPLORER))
    };
    let on_terrain = {
        let d = props.discover.clone();
        Callback::from(move |_: MouseEvent| d.emit(ids::TERRAIN_ARTIST))
    };
    let tile = "border:1px solid #3a3a40; background:rgba(20,20,24,0.9); color:#e8e6e1; padding:32px; cursor:pointer; font-family:monospace;";
    html! {
        <div style="display:flex; flex-direction:column; gap:48px; padding:48px 24px; min-height:250vh;">
            <h1 style="font-family:monospace; letter-spacing:0.3em; color:#e8e6e1;">{"FRACTALIX.LAB"}</h1>
            <button style={tile} onclick={on_sphere}>{"◉ SPHERE"}</button>
            <button style={tile} onmousedown={on_globe}>{"◎ GLOBAL PRESENCE"}</button>
            <div style={tile} onmousemove={on_terrain}>{"▦ DATA TERRAIN"}</div>
            <div style="display:flex; gap:12px;">
                { for CTAS.iter().map(|(id, label)| {
                    let hover = props.cta_hover.clone();
                    let id = id.to_string();
                    html! {
                        <button style={tile} onmouseenter={Callback::from(move |_: MouseEvent| hover.emit(id.clone()))}>{ *label }</button>
                    }
                }) }
            </div>
            <nav style="display:flex; gap:8px; position:sticky; bottom:16px;">
                { for props.menu_items.iter().map(|item| {
                    let open = props.menu_open.clone();
                    let id = item.clone();
                    html! {
                        <button style="font-family:monospace; background:#141418; color:#c8c8c8; border:1px solid #3a3a40; padding:6px 10px;"
                            onclick={Callback::from(move |_: MouseEvent| open.emit(id.clone()))}>
                            { item.to_uppercase() }
                        </button>
                    }
                }) }
            </nav>
        </div>
    }
}
