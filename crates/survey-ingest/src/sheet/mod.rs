//! Survey sheet reading utilities.

mod header;
mod reader;

pub use header::SurveyLayout;
pub use reader::{SheetRecord, SurveyData, SurveySheet, read_survey, read_survey_sheet};
