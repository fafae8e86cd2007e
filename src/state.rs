use crate::sheets::SheetsClient;

#[derive(Clone)]
pub struct AppState {
    pub sheets: SheetsClient,
}

impl AppState {
    pub fn new(sheets: SheetsClient) -> Self {
        Self { sheets }
    }
}
