use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub current_page: usize,
    pub total_pages: usize,
    pub on_page_change: Callback<usize>,
}

/// Previous, numbered and next buttons. Renders nothing for a single page.
#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    if props.total_pages <= 1 {
        return html! {};
    }

    let go_to = |page: usize| {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| on_page_change.emit(page))
    };
    let current = props.current_page;

    html! {
        <nav class="pagination">
            <button
                class="btn page-btn"
                onclick={go_to(current.saturating_sub(1).max(1))}
                disabled={current <= 1}
            >
                {"← Anterior"}
            </button>

            {for (1..=props.total_pages).map(|page| {
                let class = if page == current { "btn page-btn active" } else { "btn page-btn" };
                html! {
                    <button key={page} class={class} onclick={go_to(page)}>{page}</button>
                }
            })}

            <button
                class="btn page-btn"
                onclick={go_to((current + 1).min(props.total_pages))}
                disabled={current >= props.total_pages}
            >
                {"Siguiente →"}
            </button>
        </nav>
    }
}
