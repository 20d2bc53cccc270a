//! Prompt templates for the health assistant.
//!
//! The scoring template dictates the `Score:` / `Message:` /
//! `Suggestions:` reply shape the parser expects. Question templates wrap
//! the user's raw message; the transcript stores the raw message, the
//! completion request carries the wrapped one.

use crate::error::ServiceError;

/// Number of transcript turns fed back into the completion context.
pub const CONTEXT_WINDOW_TURNS: usize = 10;

/// System persona placed ahead of every conversation request.
pub const SYSTEM_PROMPT: &str = "\
You are HEBO, a friendly, world-class AI health assistant.

Answer in markdown with clear section headings. When you mention a medicine \
by name, link it as [MEDICINE_NAME](https://www.1mg.com/search/all?name=MEDICINE_NAME) \
with the name substituted in. When relevant, point the user to these \
pharmacies:

- [1mg](https://www.1mg.com)
- [Netmeds](https://www.netmeds.com)
- [Apollo Pharmacy](https://www.apollopharmacy.in)";

/// Disclaimer appended by the service to every conversational reply.
///
/// Appended deterministically here so the model is never also asked for
/// one; replies carry exactly one disclaimer.
pub const DISCLAIMER: &str = "\n\n---\n\n## ❗ Disclaimer\nThis is not medical advice. Please consult a licensed professional.";

/// Build the food-history scoring prompt.
///
/// The text is embedded verbatim; the reply shape matches what
/// [`assistant_core::parse_health_reply`] extracts.
pub fn food_score_prompt(food_history: &str) -> String {
    format!(
        "You are a health assistant. Rate this food history from 0 to 100 based on healthiness:\n\n\
         Food: {food_history}\n\n\
         Respond in exactly this format:\n\
         Score: <number from 0 to 100>\n\
         Message: <one or two sentences of feedback>\n\
         Suggestions:\n\
         - <first suggestion>\n\
         - <second suggestion>"
    )
}

/// Supported question kinds for `/ask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Symptom assessment question.
    Symptom,
    /// Medicine information question.
    Medicine,
}

impl QuestionKind {
    /// Parse a question kind from request input.
    pub fn parse(kind: &str) -> Result<Self, ServiceError> {
        match kind.to_lowercase().as_str() {
            "symptom" => Ok(QuestionKind::Symptom),
            "medicine" => Ok(QuestionKind::Medicine),
            other => Err(ServiceError::Validation(format!(
                "kind must be 'symptom' or 'medicine', got '{}'",
                other
            ))),
        }
    }

    /// The wire string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Symptom => "symptom",
            QuestionKind::Medicine => "medicine",
        }
    }
}

/// Build the templated user prompt for a question.
///
/// Symptom questions also carry the user's recent food history so the
/// model can connect diet and symptoms.
pub fn question_prompt(kind: QuestionKind, message: &str, food_history: Option<&str>) -> String {
    match kind {
        QuestionKind::Symptom => {
            let food = food_history.unwrap_or("No data");
            format!(
                "User reported: {message}\n\n\
                 ## 🩺 Symptom Assessment\n\n\
                 ### Possible Causes:\n\
                 List 3 possible reasons.\n\n\
                 ### Home Remedies:\n\
                 Suggest 2 remedies.\n\n\
                 ### Medicines:\n\
                 List 2-3 over-the-counter medicines with buy links.\n\n\
                 ### Health Score Link:\n\
                 User's recent food: {food}\n\
                 Any connection between food and this symptom? Briefly explain."
            )
        }
        QuestionKind::Medicine => format!(
            "User asked about: {message}\n\n\
             ## 💊 Medicine: {message}\n\n\
             ### What It Does:\n\
             Purpose.\n\n\
             ### How It Works:\n\
             Mechanism.\n\n\
             ### Side Effects & Precautions:\n\
             3 side effects.\n\
             2 warnings.\n\n\
             ### Where to Buy:\n\
             Provide a buy link for {message}."
        ),
    }
}
