use shared::DeliveryType;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_predictions::{FormField, PredictionForm};

#[derive(Properties, PartialEq)]
pub struct PredictionFormProps {
    pub form: PredictionForm,
    pub submitting: bool,

    pub on_field_change: Callback<(FormField, String)>,
    pub on_toggle_delivery_type: Callback<()>,
    pub on_submit: Callback<()>,
}

fn field_input(
    field: FormField,
    on_field_change: &Callback<(FormField, String)>,
) -> Callback<InputEvent> {
    let on_field_change = on_field_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_field_change.emit((field, input.value()));
    })
}

#[function_component(PredictionFormView)]
pub fn prediction_form(props: &PredictionFormProps) -> Html {
    let form = &props.form;
    // Picking the already selected option is a no-op
    let select = |delivery_type: DeliveryType| {
        let on_toggle = props.on_toggle_delivery_type.clone();
        let current = form.tipo_parto;
        Callback::from(move |_: MouseEvent| {
            if current != delivery_type {
                on_toggle.emit(());
            }
        })
    };
    let delivery_class = |delivery_type: DeliveryType| {
        if form.tipo_parto == delivery_type {
            "toggle-option selected"
        } else {
            "toggle-option"
        }
    };

    html! {
        <section class="prediction-form-section">
            <form class="prediction-form" onsubmit={
                let on_submit = props.on_submit.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    on_submit.emit(());
                })
            }>
                <div class="form-group">
                    <label for="nombre">{"Nombre de quien realiza el prode"}</label>
                    <input
                        type="text"
                        id="nombre"
                        placeholder="Ingresa tu nombre"
                        required=true
                        value={form.nombre.clone()}
                        oninput={field_input(FormField::Nombre, &props.on_field_change)}
                        disabled={props.submitting}
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="fechaNacimiento">{"Fecha del nacimiento"}</label>
                        <input
                            type="date"
                            id="fechaNacimiento"
                            required=true
                            value={form.fecha_nacimiento.clone()}
                            oninput={
                                field_input(FormField::FechaNacimiento, &props.on_field_change)
                            }
                            disabled={props.submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="horaNacimiento">{"Hora del nacimiento"}</label>
                        <input
                            type="time"
                            id="horaNacimiento"
                            required=true
                            value={form.hora_nacimiento.clone()}
                            oninput={field_input(FormField::HoraNacimiento, &props.on_field_change)}
                            disabled={props.submitting}
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="peso">{"Peso (kg)"}</label>
                        <input
                            type="number"
                            id="peso"
                            step="0.01"
                            min="0"
                            placeholder="Ej: 3.5"
                            required=true
                            value={form.peso.clone()}
                            oninput={field_input(FormField::Peso, &props.on_field_change)}
                            disabled={props.submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="longitud">{"Longitud (cm)"}</label>
                        <input
                            type="number"
                            id="longitud"
                            step="0.1"
                            min="0"
                            placeholder="Ej: 50"
                            required=true
                            value={form.longitud.clone()}
                            oninput={field_input(FormField::Longitud, &props.on_field_change)}
                            disabled={props.submitting}
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label>{"Tipo de parto"}</label>
                    <div class="toggle-group">
                        <button
                            type="button"
                            class={delivery_class(DeliveryType::Natural)}
                            onclick={select(DeliveryType::Natural)}
                            disabled={props.submitting}
                        >
                            {DeliveryType::Natural.as_str()}
                        </button>
                        <button
                            type="button"
                            class={delivery_class(DeliveryType::Cesarea)}
                            onclick={select(DeliveryType::Cesarea)}
                            disabled={props.submitting}
                        >
                            {DeliveryType::Cesarea.as_str()}
                        </button>
                    </div>
                </div>

                <div class="form-group">
                    <label for="numeroHabitacion">{"Número de habitación"}</label>
                    <input
                        type="text"
                        id="numeroHabitacion"
                        placeholder="Ej: 205 o A-12"
                        required=true
                        value={form.numero_habitacion.clone()}
                        oninput={field_input(FormField::NumeroHabitacion, &props.on_field_change)}
                        disabled={props.submitting}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    {if props.submitting { "Guardando..." } else { "Guardar" }}
                </button>
            </form>
        </section>
    }
}
