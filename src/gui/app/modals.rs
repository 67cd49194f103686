use crate::gui::{
    error_modal::ErrorModal,
    settings::ServiceSettingsModal,
};

#[derive(Default)]
pub struct Modals {
    pub error: ErrorModal,
    pub service_settings: ServiceSettingsModal,
}
