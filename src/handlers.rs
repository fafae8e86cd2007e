use crate::errors::AppError;
use crate::models::{AttendanceForm, AttendanceRecord, SubmitResponse};
use crate::state::AppState;
use crate::ui::{Notice, render_index};
use axum::{Form, Json, extract::State, response::Html};
use chrono::{Local, NaiveDate};
use tracing::info;

const EMPTY_FIELDS_MESSAGE: &str = "Please fill in both fields before submitting.";

pub async fn index() -> Html<String> {
    Html(render_index(&display_date(today()), None))
}

/// Browser form submission; re-renders the page with a banner either way.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<AttendanceForm>,
) -> Html<String> {
    let date = today();
    let display = display_date(date);

    let notice = match form.normalized() {
        None => Notice::error(EMPTY_FIELDS_MESSAGE.to_string()),
        Some(record) => {
            let name = record.name.clone();
            match append_attendance(&state, date, record).await {
                Ok(()) => Notice::ok(format!("Attendance marked for {name} on {display} ✅")),
                Err(err) => Notice::error(format!("Google Sheets error: {err}")),
            }
        }
    };

    Html(render_index(&display, Some(&notice)))
}

pub async fn submit_api(
    State(state): State<AppState>,
    Json(form): Json<AttendanceForm>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Some(record) = form.normalized() else {
        return Err(AppError::bad_request(EMPTY_FIELDS_MESSAGE));
    };

    let date = today();
    let name = record.name.clone();
    append_attendance(&state, date, record).await?;

    Ok(Json(SubmitResponse {
        name,
        date: display_date(date),
        worksheet: tab_title(date),
    }))
}

async fn append_attendance(
    state: &AppState,
    date: NaiveDate,
    record: AttendanceRecord,
) -> Result<(), crate::errors::SheetsError> {
    let title = tab_title(date);
    state.sheets.ensure_worksheet(&title).await?;
    state.sheets.append_row(&title, &record.into_row()).await?;
    info!("appended attendance row to '{title}'");
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Worksheet tab name, e.g. "27 08 26".
pub fn tab_title(date: NaiveDate) -> String {
    date.format("%d %m %y").to_string()
}

/// Date shown to the user, e.g. "27-08-26".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_title_uses_space_separated_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        assert_eq!(tab_title(date), "27 08 26");
    }

    #[test]
    fn display_date_uses_dashes() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert_eq!(display_date(date), "03-01-26");
    }
}
