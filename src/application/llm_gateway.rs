//! LLM Gateway - mentor replies and diagnostic grading over the
//! `LanguageModel` port.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::domain::assessment::QuizResult;
use crate::domain::catalog::DiagnosticQuestion;
use crate::domain::learner::LearnerProfile;
use crate::domain::mentor::{
    grading_prompt, mentor_system_instruction, mentor_user_content, EMPTY_REPLY_TEXT,
};
use crate::ports::{CredentialSource, GatewayError, GenerationRequest, LanguageModel};

pub struct LlmGateway {
    model: Arc<dyn LanguageModel>,
    credentials: Arc<dyn CredentialSource>,
}

impl LlmGateway {
    pub fn new(model: Arc<dyn LanguageModel>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self { model, credentials }
    }

    /// Raw mentor reply, including any follow-up section.
    ///
    /// Fails with `MissingCredential` before contacting the model when no
    /// key is configured.
    pub async fn generate_mentor_reply(
        &self,
        message: &str,
        context: &str,
        profile: Option<&LearnerProfile>,
    ) -> Result<String, GatewayError> {
        let credential = self
            .credentials
            .current()
            .ok_or(GatewayError::MissingCredential)?;

        let request = GenerationRequest::new(credential, mentor_user_content(context, message))
            .with_system_instruction(mentor_system_instruction(profile));

        let response = self.model.generate(request).await?;
        if response.text.trim().is_empty() {
            return Ok(EMPTY_REPLY_TEXT.to_string());
        }
        Ok(response.text)
    }

    /// Grades one diagnostic answer. Never fails: any problem yields the
    /// minimum result with guidance to check the API key.
    pub async fn grade_open_response(
        &self,
        question: &DiagnosticQuestion,
        answer: &str,
        profile: Option<&LearnerProfile>,
    ) -> QuizResult {
        match self.try_grade(question, answer, profile).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(question_id = %question.id, error = %e, "grading fell back to default result");
                QuizResult::grading_fallback()
            }
        }
    }

    async fn try_grade(
        &self,
        question: &DiagnosticQuestion,
        answer: &str,
        profile: Option<&LearnerProfile>,
    ) -> Result<QuizResult, GatewayError> {
        let credential = self
            .credentials
            .current()
            .ok_or(GatewayError::MissingCredential)?;

        let prompt = grading_prompt(
            &question.question,
            &question.scenario,
            answer,
            &question.rubric,
            profile,
        );
        let request = GenerationRequest::new(credential, prompt).with_response_schema(grading_schema());

        let response = self.model.generate(request).await?;
        parse_grade(&response.text)
    }
}

fn grading_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "level": { "type": "INTEGER", "description": "1, 3, or 5" },
            "score": { "type": "INTEGER", "description": "0-100" },
            "feedback": { "type": "STRING", "description": "Actionable advice with industry analogies" }
        },
        "required": ["level", "score", "feedback"]
    })
}

#[derive(Debug, Deserialize)]
struct GradeReply {
    level: f64,
    score: f64,
    #[serde(default)]
    feedback: String,
}

/// Parses the grader's JSON, tolerating a markdown code fence around it.
fn parse_grade(text: &str) -> Result<QuizResult, GatewayError> {
    let body = strip_code_fence(text);
    let reply: GradeReply = serde_json::from_str(body)
        .map_err(|e| GatewayError::transient(format!("unreadable grading reply: {}", e)))?;
    Ok(QuizResult::clamped(
        reply.level.round() as i64,
        reply.score.round() as i64,
        reply.feedback,
    ))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use crate::domain::assessment::GRADING_FALLBACK_FEEDBACK;
    use crate::domain::catalog::ContentCatalog;
    use crate::ports::StaticCredential;

    fn gateway(model: &MockLanguageModel, key: Option<&str>) -> LlmGateway {
        let credentials = match key {
            Some(k) => StaticCredential::new(k),
            None => StaticCredential::none(),
        };
        LlmGateway::new(Arc::new(model.clone()), Arc::new(credentials))
    }

    fn question() -> DiagnosticQuestion {
        ContentCatalog::builtin().unwrap().diagnostic_questions[0].clone()
    }

    #[tokio::test]
    async fn missing_credential_skips_the_model() {
        let model = MockLanguageModel::new().with_response("unused");
        let err = gateway(&model, None)
            .generate_mentor_reply("hi", "", None)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::MissingCredential);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn rejected_credential_is_passed_through() {
        let model = MockLanguageModel::new().with_error(GatewayError::InvalidCredential);
        let err = gateway(&model, Some("bad"))
            .generate_mentor_reply("hi", "", None)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::InvalidCredential);
    }

    #[tokio::test]
    async fn mentor_request_carries_context_and_persona() {
        let model = MockLanguageModel::new().with_response("Sure.");
        let profile = LearnerProfile::new("Alice", "Senior PM", "Fintech");
        let reply = gateway(&model, Some("k"))
            .generate_mentor_reply("What is RAG?", "user: hi", Some(&profile))
            .await
            .unwrap();

        assert_eq!(reply, "Sure.");
        let call = model.last_call().unwrap();
        assert_eq!(call.contents, "Context: user: hi\n\nUser: What is RAG?");
        let system = call.system_instruction.unwrap();
        assert!(system.contains("---FOLLOW_UP---"));
        assert!(system.contains("Use analogies from Fintech"));
        assert!(call.response_schema.is_none());
    }

    #[tokio::test]
    async fn empty_reply_is_substituted() {
        let model = MockLanguageModel::new().with_response("   ");
        let reply = gateway(&model, Some("k"))
            .generate_mentor_reply("hi", "", None)
            .await
            .unwrap();
        assert_eq!(reply, EMPTY_REPLY_TEXT);
    }

    #[tokio::test]
    async fn grading_parses_and_clamps() {
        let model = MockLanguageModel::new()
            .with_response(r#"{"level": 9, "score": 140, "feedback": "Strong answer"}"#);
        let result = gateway(&model, Some("k"))
            .grade_open_response(&question(), "I would add evals", None)
            .await;

        assert_eq!(result.level, 5);
        assert_eq!(result.score, 100);
        assert_eq!(result.feedback, "Strong answer");
        assert!(model.last_call().unwrap().response_schema.is_some());
    }

    #[tokio::test]
    async fn grading_accepts_fenced_json() {
        let model = MockLanguageModel::new()
            .with_response("```json\n{\"level\": 3, \"score\": 61, \"feedback\": \"ok\"}\n```");
        let result = gateway(&model, Some("k"))
            .grade_open_response(&question(), "answer", None)
            .await;
        assert_eq!((result.level, result.score), (3, 61));
    }

    #[tokio::test]
    async fn grading_failures_fall_back() {
        for model in [
            MockLanguageModel::new().with_error(GatewayError::transient("503")),
            MockLanguageModel::new().with_response("not json"),
        ] {
            let result = gateway(&model, Some("k"))
                .grade_open_response(&question(), "answer", None)
                .await;
            assert_eq!(result, QuizResult::grading_fallback());
        }

        let model = MockLanguageModel::new();
        let result = gateway(&model, None)
            .grade_open_response(&question(), "answer", None)
            .await;
        assert_eq!(result.level, 1);
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, GRADING_FALLBACK_FEEDBACK);
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence(" {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
