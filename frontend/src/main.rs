use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::header::Header;
use components::pagination_controls::PaginationControls;
use components::prediction_form::PredictionFormView;
use components::prediction_table::PredictionTable;
use hooks::use_predictions::use_predictions;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let predictions = use_predictions(&api_client);
    let state = &predictions.state;
    let actions = &predictions.actions;
    let total_pages = state.total_pages();

    html! {
        <main class="app">
            <Header />

            <PredictionFormView
                form={state.form.clone()}
                submitting={state.submitting}
                on_field_change={actions.set_field.clone()}
                on_toggle_delivery_type={actions.toggle_delivery_type.clone()}
                on_submit={actions.submit.clone()}
            />

            {if state.predictions.is_empty() {
                html! {}
            } else {
                html! {
                    <>
                        <PredictionTable
                            predictions={state.visible()}
                            total_count={state.predictions.len()}
                            current_page={state.current_page}
                            total_pages={total_pages}
                            on_delete={actions.delete.clone()}
                        />
                        <PaginationControls
                            current_page={state.current_page}
                            total_pages={total_pages}
                            on_page_change={actions.set_page.clone()}
                        />
                    </>
                }
            }}
        </main>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
