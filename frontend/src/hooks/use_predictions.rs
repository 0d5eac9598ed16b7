use std::rc::Rc;

use shared::{
    paginate, total_pages, CreatePredictionRequest, DeliveryType, FieldValue, PredictionRecord,
    PAGE_SIZE,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_predictions";

/// Text inputs of the prediction form
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormField {
    Nombre,
    FechaNacimiento,
    HoraNacimiento,
    Peso,
    Longitud,
    NumeroHabitacion,
}

/// Values currently typed into the form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictionForm {
    pub nombre: String,
    pub fecha_nacimiento: String,
    pub hora_nacimiento: String,
    pub peso: String,
    pub longitud: String,
    pub tipo_parto: DeliveryType,
    pub numero_habitacion: String,
}

impl PredictionForm {
    pub fn with_field(&self, field: FormField, value: String) -> Self {
        let mut form = self.clone();
        match field {
            FormField::Nombre => form.nombre = value,
            FormField::FechaNacimiento => form.fecha_nacimiento = value,
            FormField::HoraNacimiento => form.hora_nacimiento = value,
            FormField::Peso => form.peso = value,
            FormField::Longitud => form.longitud = value,
            FormField::NumeroHabitacion => form.numero_habitacion = value,
        }
        form
    }

    pub fn to_request(&self) -> CreatePredictionRequest {
        let text = |value: &str| Some(FieldValue::Text(value.to_string()));
        CreatePredictionRequest {
            nombre: text(&self.nombre),
            fecha_nacimiento: text(&self.fecha_nacimiento),
            hora_nacimiento: text(&self.hora_nacimiento),
            peso: text(&self.peso),
            longitud: text(&self.longitud),
            tipo_parto: text(self.tipo_parto.as_str()),
            numero_habitacion: text(&self.numero_habitacion),
        }
    }
}

/// Everything a request completion may change. Completions arrive as
/// [`PredictionAction`]s and are applied to whatever the state is by then.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionAction {
    /// The server list arrived
    Loaded(Vec<PredictionRecord>),
    SetField(FormField, String),
    ToggleDeliveryType,
    SubmitStarted,
    /// The server stored the submission
    Saved(PredictionRecord),
    SaveFailed,
    /// The server confirmed the delete
    Removed(String),
    SetPage(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PredictionState {
    pub form: PredictionForm,
    pub submitting: bool,
    pub predictions: Vec<PredictionRecord>,
    pub current_page: usize,
    // Local edits made while a list request may still be in flight
    saved_since_load: Vec<PredictionRecord>,
    removed_since_load: Vec<String>,
}

impl Default for PredictionState {
    fn default() -> Self {
        Self {
            form: PredictionForm::default(),
            submitting: false,
            predictions: Vec::new(),
            current_page: 1,
            saved_since_load: Vec::new(),
            removed_since_load: Vec::new(),
        }
    }
}

impl PredictionState {
    pub fn total_pages(&self) -> usize {
        total_pages(self.predictions.len(), PAGE_SIZE)
    }

    /// Rows visible on the current page
    pub fn visible(&self) -> Vec<PredictionRecord> {
        paginate(&self.predictions, self.current_page, PAGE_SIZE).items.to_vec()
    }

    /// Apply one action, returning the next state
    pub fn apply(&self, action: PredictionAction) -> Self {
        let mut next = self.clone();
        match action {
            PredictionAction::Loaded(records) => {
                // A list fetched before a local save or delete must not undo it
                let mut merged: Vec<PredictionRecord> = next
                    .saved_since_load
                    .iter()
                    .filter(|saved| !records.iter().any(|record| record.id == saved.id))
                    .cloned()
                    .collect();
                merged.extend(
                    records
                        .into_iter()
                        .filter(|record| !next.removed_since_load.contains(&record.id)),
                );
                next.predictions = merged;
                next.saved_since_load.clear();
                next.removed_since_load.clear();
                next.current_page = clamp_page(next.current_page, next.predictions.len());
            }
            PredictionAction::SetField(field, value) => {
                next.form = next.form.with_field(field, value);
            }
            PredictionAction::ToggleDeliveryType => {
                next.form.tipo_parto = next.form.tipo_parto.toggle();
            }
            PredictionAction::SubmitStarted => next.submitting = true,
            PredictionAction::Saved(record) => {
                next.predictions.insert(0, record.clone());
                next.saved_since_load.insert(0, record);
                next.form = PredictionForm::default();
                next.submitting = false;
            }
            PredictionAction::SaveFailed => next.submitting = false,
            PredictionAction::Removed(id) => {
                next.predictions.retain(|record| record.id != id);
                next.saved_since_load.retain(|record| record.id != id);
                next.removed_since_load.push(id);
                next.current_page = clamp_page(next.current_page, next.predictions.len());
            }
            PredictionAction::SetPage(page) => {
                next.current_page = clamp_page(page, next.predictions.len());
            }
        }
        next
    }
}

impl Reducible for PredictionState {
    type Action = PredictionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[derive(Clone)]
pub struct UsePredictionsActions {
    pub refresh: Callback<()>,
    pub submit: Callback<()>,
    pub delete: Callback<String>,
    pub set_field: Callback<(FormField, String)>,
    pub toggle_delivery_type: Callback<()>,
    pub set_page: Callback<usize>,
}

pub struct UsePredictionsResult {
    pub state: PredictionState,
    pub actions: UsePredictionsActions,
}

/// Clamp `page` into `[1, total_pages]` for a list of `len` records
fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, total_pages(len, PAGE_SIZE).max(1))
}

#[hook]
pub fn use_predictions(api_client: &ApiClient) -> UsePredictionsResult {
    let state = use_reducer(PredictionState::default);
    let dispatcher = state.dispatcher();

    let refresh = use_callback(
        (api_client.clone(), dispatcher.clone()),
        |_: (), (api_client, dispatcher)| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();

            spawn_local(async move {
                match api_client.list_predictions().await {
                    Ok(records) => dispatcher.dispatch(PredictionAction::Loaded(records)),
                    Err(e) => Logger::warn_with_component(
                        COMPONENT,
                        &format!("Error al cargar datos: {}", e),
                    ),
                }
            });
        },
    );

    // Load the list once on mount
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let submit = use_callback(
        (
            api_client.clone(),
            dispatcher.clone(),
            state.form.clone(),
            state.submitting,
        ),
        |_: (), (api_client, dispatcher, form, submitting)| {
            if *submitting {
                return;
            }
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let request = form.to_request();

            dispatcher.dispatch(PredictionAction::SubmitStarted);
            spawn_local(async move {
                match api_client.create_prediction(&request).await {
                    Ok(record) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("Saved prediction {}", record.id),
                        );
                        dispatcher.dispatch(PredictionAction::Saved(record));
                    }
                    Err(message) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Error al guardar: {}", message),
                        );
                        dispatcher.dispatch(PredictionAction::SaveFailed);
                        gloo::dialogs::alert(&message);
                    }
                }
            });
        },
    );

    let delete = use_callback(
        (api_client.clone(), dispatcher.clone()),
        |id: String, (api_client, dispatcher)| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();

            spawn_local(async move {
                match api_client.delete_prediction(&id).await {
                    Ok(_) => dispatcher.dispatch(PredictionAction::Removed(id)),
                    Err(message) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Error al eliminar: {}", message),
                        );
                        gloo::dialogs::alert(&message);
                    }
                }
            });
        },
    );

    let set_field = use_callback(
        dispatcher.clone(),
        |(field, value): (FormField, String), dispatcher| {
            dispatcher.dispatch(PredictionAction::SetField(field, value));
        },
    );

    let toggle_delivery_type = use_callback(dispatcher.clone(), |_: (), dispatcher| {
        dispatcher.dispatch(PredictionAction::ToggleDeliveryType);
    });

    let set_page = use_callback(dispatcher, |page: usize, dispatcher| {
        dispatcher.dispatch(PredictionAction::SetPage(page));
    });

    UsePredictionsResult {
        state: (*state).clone(),
        actions: UsePredictionsActions {
            refresh,
            submit,
            delete,
            set_field,
            toggle_delivery_type,
            set_page,
        },
    }
}
