use yew::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <h1>{"JuliProde"}</h1>
            <p class="subtitle">{"Completa el formulario con tus predicciones"}</p>
        </header>
    }
}
