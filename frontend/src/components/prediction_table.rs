use shared::format::{format_birth_date, format_length, format_weight, prediction_count_label};
use shared::PredictionRecord;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionTableProps {
    /// Rows on the current page
    pub predictions: Vec<PredictionRecord>,
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub on_delete: Callback<String>,
}

#[function_component(PredictionTable)]
pub fn prediction_table(props: &PredictionTableProps) -> Html {
    html! {
        <section class="predictions-section">
            <div class="predictions-header">
                <h2>{"Todos los Prodes Guardados"}</h2>
                <span class="count">{prediction_count_label(props.total_count)}</span>
                {if props.total_pages > 1 {
                    html! {
                        <p class="page-indicator">
                            {format!("Página {} de {}", props.current_page, props.total_pages)}
                        </p>
                    }
                } else { html! {} }}
            </div>

            <div class="table-container">
                <table class="predictions-table">
                    <thead>
                        <tr>
                            <th>{"Nombre"}</th>
                            <th>{"Fecha"}</th>
                            <th>{"Hora"}</th>
                            <th>{"Peso"}</th>
                            <th>{"Longitud"}</th>
                            <th>{"Tipo Parto"}</th>
                            <th>{"Habitación"}</th>
                            <th class="hidden">{"Acción"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for props.predictions.iter().map(|prediction| {
                            let on_delete = {
                                let on_delete = props.on_delete.clone();
                                let id = prediction.id.clone();
                                Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                            };

                            html! {
                                <tr key={prediction.id.clone()}>
                                    <td class="nombre">{&prediction.nombre}</td>
                                    <td class="date">
                                        {format_birth_date(&prediction.fecha_nacimiento)}
                                    </td>
                                    <td class="time">{&prediction.hora_nacimiento}</td>
                                    <td class="peso">{format_weight(&prediction.peso)}</td>
                                    <td class="longitud">{format_length(&prediction.longitud)}</td>
                                    <td class="tipo-parto">
                                        <span class="badge">{prediction.tipo_parto.as_str()}</span>
                                    </td>
                                    <td class="habitacion">{&prediction.numero_habitacion}</td>
                                    // Deletion is kept out of sight of regular visitors
                                    <td class="hidden">
                                        <button class="btn btn-danger" onclick={on_delete}>
                                            {"Eliminar"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        </section>
    }
}
